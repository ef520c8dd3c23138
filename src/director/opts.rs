use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{StagehandError, StagehandResult};
use crate::schedule::sequencer::Sequencer;

/// Options controlling a [`Director`](crate::director::Director).
///
/// Missing JSON fields fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectorOpts {
    /// Multiplier applied to timer seconds before they reach the timeline.
    pub time_scale: f64,
    /// Horizontal gap between arranged nodes, in world units.
    pub arrange_spacing: f64,
    /// Stagger used by `build`/`unbuild` when no sequencer is given.
    pub build_sequencer: Sequencer,
}

impl Default for DirectorOpts {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            arrange_spacing: 10.0,
            build_sequencer: Sequencer::new(0.0, 0.5, 0.4),
        }
    }
}

impl DirectorOpts {
    /// Parse and validate options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StagehandResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| StagehandError::config(format!("parse director options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_str(json: &str) -> StagehandResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Parse and validate options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StagehandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StagehandError::config(format!("open director options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> StagehandResult<()> {
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            return Err(StagehandError::config(format!(
                "time_scale must be finite and > 0, got {}",
                self.time_scale
            )));
        }
        if !(self.arrange_spacing.is_finite() && self.arrange_spacing >= 0.0) {
            return Err(StagehandError::config(format!(
                "arrange_spacing must be finite and >= 0, got {}",
                self.arrange_spacing
            )));
        }
        self.build_sequencer
            .validate()
            .map_err(|e| StagehandError::config(format!("build_sequencer: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/opts.rs"]
mod tests;
