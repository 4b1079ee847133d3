//! Domain error types.
//!
//! Configuration problems (including an unknown risk band) are fatal to the
//! calling evaluation and surface immediately. Data gaps (unknown tickers,
//! short price histories, empty sleeves) are recovered locally inside the
//! engine and never become errors.

/// Top-level error type for nestegg.
#[derive(Debug, thiserror::Error)]
pub enum NesteggError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown risk band: {band}")]
    UnknownRiskBand { band: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&NesteggError> for std::process::ExitCode {
    fn from(err: &NesteggError) -> Self {
        let code: u8 = match err {
            NesteggError::Io(_) => 1,
            NesteggError::ConfigParse { .. }
            | NesteggError::ConfigMissing { .. }
            | NesteggError::ConfigInvalid { .. }
            | NesteggError::UnknownRiskBand { .. } => 2,
            NesteggError::Data { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_risk_band_message() {
        let err = NesteggError::UnknownRiskBand {
            band: "reckless".to_string(),
        };
        assert_eq!(err.to_string(), "unknown risk band: reckless");
    }

    #[test]
    fn config_invalid_message() {
        let err = NesteggError::ConfigInvalid {
            section: "band.balanced".to_string(),
            key: "drift_trigger".to_string(),
            reason: "must be between 0 and 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [band.balanced] drift_trigger: must be between 0 and 1"
        );
    }
}
