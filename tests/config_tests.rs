use std::fs;

use coincinfo::domain::SortOrder;
use coincinfo::error::{ConfigError, Error};
use coincinfo::infrastructure::config::settings::Config;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config::load_or_default(dir.path().join("coincinfo.toml")).unwrap();
    assert_eq!(config.report.coinc_group, "background_exc");
    assert_eq!(config.statistic.sngl_ranking, "newsnr");
}

#[test]
fn load_reads_every_section() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("coincinfo.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
format = "json"

[statistic]
ranking_statistic = "single_ranking_only"
sngl_ranking = "newsnr_sgveto_psdvar"

[links]
detector_status_url = "https://example.org/summary/{ifo}/{date}/"
search_url = "https://example.org/search/"
search_window = 1.0

[report]
coinc_group = "foreground"
sort_key = "stat"
sort_order = "ascending"
"#,
    )
    .expect("write config");

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.statistic.sngl_ranking, "newsnr_sgveto_psdvar");
    assert_eq!(config.links.search_window, 1.0);
    assert_eq!(config.report.sort_key, "stat");
    assert_eq!(config.report.sort_order, SortOrder::Ascending);

    let links = config.links.link_options(true, true).unwrap();
    assert!(links.detector_status.is_some());
    assert_eq!(
        links.search.map(|s| s.base.to_string()),
        Some("https://example.org/search/".to_string())
    );
}

#[test]
fn links_are_opt_in() {
    let links = Config::default().links.link_options(false, false).unwrap();
    assert!(links.detector_status.is_none());
    assert!(links.search.is_none());
}

#[test]
fn unreadable_file_is_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Config::load(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn unknown_family_is_invalid() {
    let result = Config::parse_toml("[statistic]\nranking_statistic = \"max_snr\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "ranking_statistic",
            ..
        }))
    ));
}

#[test]
fn empty_group_is_missing() {
    let result = Config::parse_toml("[report]\ncoinc_group = \"\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "coinc_group"
        }))
    ));
}
