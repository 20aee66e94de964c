use crate::countymap::*;

use county_results::palette;
use serde::Serialize;

/// One bin table: N+1 edges, N labels in legend order, N colors.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BinTableConfig {
    pub edges: Vec<f64>,
    pub labels: Vec<String>,
    pub colors: Vec<String>,
}

impl BinTableConfig {
    fn bin_spec(&self, name: &str) -> CmResult<BinSpec> {
        BinSpec::new(name, &self.edges, &self.labels, &self.colors).context(InvalidBinsSnafu {})
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinsConfig {
    #[serde(rename = "marginByShare")]
    pub margin_by_share: Option<BinTableConfig>,
    #[serde(rename = "swingByShare")]
    pub swing_by_share: Option<BinTableConfig>,
    #[serde(rename = "marginByVotes")]
    pub margin_by_votes: Option<BinTableConfig>,
    #[serde(rename = "fallbackColor")]
    pub fallback_color: Option<String>,
}

impl BinsConfig {
    /// Builds and validates the three bin tables. Missing sections use the
    /// built-in tables.
    pub fn palette(&self) -> CmResult<Palette> {
        let margin_by_share = match &self.margin_by_share {
            Some(t) => t.bin_spec(palette::MARGIN_BY_SHARE)?,
            None => palette::margin_by_share().context(InvalidBinsSnafu {})?,
        };
        let swing_by_share = match &self.swing_by_share {
            Some(t) => t.bin_spec(palette::SWING_BY_SHARE)?,
            None => palette::swing_by_share().context(InvalidBinsSnafu {})?,
        };
        let margin_by_votes = match &self.margin_by_votes {
            Some(t) => t.bin_spec(palette::MARGIN_BY_VOTES)?,
            None => palette::margin_by_votes().context(InvalidBinsSnafu {})?,
        };
        let res = match &self.fallback_color {
            Some(c) => Palette {
                margin_by_share: margin_by_share.with_fallback_color(c),
                swing_by_share: swing_by_share.with_fallback_color(c),
                margin_by_votes: margin_by_votes.with_fallback_color(c),
            },
            None => Palette {
                margin_by_share,
                swing_by_share,
                margin_by_votes,
            },
        };
        Ok(res)
    }
}

pub fn parse_bins_config(contents: &str) -> CmResult<BinsConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

pub fn read_bins_config(path: &str) -> CmResult<BinsConfig> {
    info!("Reading bin configuration {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config = parse_bins_config(&contents)?;
    debug!("read_bins_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> CmResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_builtin() {
        let config = parse_bins_config("{}").unwrap();
        assert_eq!(config, BinsConfig::default());
        assert_eq!(config.palette().unwrap(), Palette::builtin().unwrap());
    }

    #[test]
    fn overrides_one_table() {
        let config = parse_bins_config(
            r#"{
                "marginByShare": {
                    "edges": [0.0, 0.5, 1.0],
                    "labels": ["Rep", "Dem"],
                    "colors": ["red", "blue"]
                },
                "fallbackColor": "gray"
            }"#,
        )
        .unwrap();
        let p = config.palette().unwrap();
        assert_eq!(p.margin_by_share.labels(), &["Rep", "Dem"]);
        assert_eq!(p.margin_by_share.classify(0.5), Some("Dem"));
        assert_eq!(p.margin_by_share.color(None), "gray");
        assert_eq!(p.swing_by_share.labels().len(), 12);
        assert_eq!(p.swing_by_share.color(None), "gray");
    }

    #[test]
    fn invalid_table_is_rejected_at_load() {
        let config = parse_bins_config(
            r#"{"marginByVotes": {"edges": [0, 10, 5], "labels": ["a", "b"], "colors": ["x", "y"]}}"#,
        )
        .unwrap();
        let err = config.palette().unwrap_err();
        assert!(matches!(
            err,
            CountyMapError::InvalidBins {
                source: BinSpecError::NonAscendingEdges { index: 2, .. }
            }
        ));
    }

    #[test]
    fn bad_json() {
        assert!(matches!(
            parse_bins_config("{\"marginByShare\": 3}"),
            Err(CountyMapError::ParsingJson { .. })
        ));
    }
}
