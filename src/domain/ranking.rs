//! Single-detector ranking functions.
//!
//! These are the re-weighted SNR family used to rank a lone trigger.
//! Each takes the trigger's SNR and reduced chi-square (and optionally the
//! sine-Gaussian chi-square and PSD variation) and returns a scalar that
//! is never larger than the input SNR.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Chi-square exponent of the re-weighting.
const NEWSNR_Q: f64 = 6.0;
const NEWSNR_N: f64 = 2.0;

/// Sine-Gaussian chi-square above which the SNR is down-weighted.
const SGCHISQ_THRESHOLD: f64 = 4.0;

/// PSD variation values below this are considered unphysical and reset to 1.
const MIN_EXPECTED_PSDVAR: f64 = 0.65;

/// Re-weighted SNR.
///
/// Unchanged when `reduced_chisq <= 1` (and when it is NaN).
#[must_use]
pub fn newsnr(snr: f64, reduced_chisq: f64) -> f64 {
    if reduced_chisq > 1.0 {
        let factor = (1.0 + reduced_chisq.powf(NEWSNR_Q / NEWSNR_N)) / 2.0;
        snr * factor.powf(-1.0 / NEWSNR_Q)
    } else {
        snr
    }
}

/// Re-weighted SNR with the sine-Gaussian veto applied.
#[must_use]
pub fn newsnr_sgveto(snr: f64, reduced_chisq: f64, sg_chisq: f64) -> f64 {
    let nsnr = newsnr(snr, reduced_chisq);
    if sg_chisq > SGCHISQ_THRESHOLD {
        nsnr * (sg_chisq / SGCHISQ_THRESHOLD).powf(-0.5)
    } else {
        nsnr
    }
}

/// Re-weighted SNR with the sine-Gaussian veto and PSD-variation rescaling.
#[must_use]
pub fn newsnr_sgveto_psdvar(snr: f64, reduced_chisq: f64, sg_chisq: f64, psd_var_val: f64) -> f64 {
    let psd_var_val = if psd_var_val < MIN_EXPECTED_PSDVAR {
        1.0
    } else {
        psd_var_val
    };
    let scaled_snr = snr * psd_var_val.powf(-0.5);
    let scaled_rchisq = reduced_chisq / psd_var_val;
    newsnr_sgveto(scaled_snr, scaled_rchisq, sg_chisq)
}

/// Named single-detector ranking functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnglRanking {
    Snr,
    #[default]
    Newsnr,
    NewsnrSgveto,
    NewsnrSgvetoPsdvar,
}

impl SnglRanking {
    pub const ALL: [SnglRanking; 4] = [
        Self::Snr,
        Self::Newsnr,
        Self::NewsnrSgveto,
        Self::NewsnrSgvetoPsdvar,
    ];

    /// Configuration identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Snr => "snr",
            Self::Newsnr => "newsnr",
            Self::NewsnrSgveto => "newsnr_sgveto",
            Self::NewsnrSgvetoPsdvar => "newsnr_sgveto_psdvar",
        }
    }

    /// Trigger fields this ranking reads.
    #[must_use]
    pub const fn inputs(self) -> &'static [&'static str] {
        match self {
            Self::Snr => &["snr"],
            Self::Newsnr => &["snr", "chisq", "chisq_dof"],
            Self::NewsnrSgveto => &["snr", "chisq", "chisq_dof", "sg_chisq"],
            Self::NewsnrSgvetoPsdvar => &["snr", "chisq", "chisq_dof", "sg_chisq", "psd_var_val"],
        }
    }
}

impl fmt::Display for SnglRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SnglRanking {
    type Err = ReportError;

    fn from_str(s: &str) -> ReportResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.id() == wanted)
            .ok_or_else(|| {
                ReportError::configuration(format!("unknown single-detector ranking '{wanted}'"))
            })
    }
}

/// Column label for a statistic identifier.
///
/// Unknown identifiers are returned unchanged.
#[must_use]
pub fn display_name(id: &str) -> &str {
    match id {
        "snr" => "SNR",
        "newsnr" => "Reweighted SNR",
        "newsnr_sgveto" => "Reweighted SNR (+sgveto)",
        "newsnr_sgveto_psdvar" => "Reweighted SNR (+sgveto+psdvar)",
        "newsnr_sgveto_psdvar_threshold" => "Reweighted SNR (+sgveto+psdvar threshold)",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newsnr_leaves_good_fits_alone() {
        assert_eq!(newsnr(10.0, 0.8), 10.0);
        assert_eq!(newsnr(10.0, 1.0), 10.0);
        assert_eq!(newsnr(10.0, f64::NAN), 10.0);
    }

    #[test]
    fn newsnr_downweights_poor_fits() {
        // rchisq = 2: ((1 + 8) / 2)^(-1/6) = 4.5^(-1/6)
        let expected = 10.0 * 4.5_f64.powf(-1.0 / 6.0);
        assert!((newsnr(10.0, 2.0) - expected).abs() < 1e-12);
        assert!(newsnr(10.0, 2.0) < 10.0);
    }

    #[test]
    fn sgveto_only_above_threshold() {
        assert_eq!(newsnr_sgveto(10.0, 1.0, 3.0), 10.0);
        assert!((newsnr_sgveto(10.0, 1.0, 16.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn psdvar_resets_low_values() {
        assert_eq!(newsnr_sgveto_psdvar(10.0, 1.0, 1.0, 0.5), 10.0);
        assert!((newsnr_sgveto_psdvar(10.0, 1.0, 1.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn display_names_pass_unknown_through() {
        assert_eq!(display_name("newsnr"), "Reweighted SNR");
        assert_eq!(display_name("my_custom_stat"), "my_custom_stat");
    }

    #[test]
    fn parse_ranking_ids() {
        assert_eq!("newsnr_sgveto".parse::<SnglRanking>().unwrap(), SnglRanking::NewsnrSgveto);
        assert!(matches!(
            "bogus".parse::<SnglRanking>(),
            Err(ReportError::Configuration { .. })
        ));
    }
}
