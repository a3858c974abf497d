//! Scale adapters: the coordinate mapping the selection engine consumes.
//!
//! The rendering layer owns its scales. The engine only needs to ask where a
//! category or value lands in pixel space, and for continuous scales, what
//! value sits under a pixel. [`ScaleAdapter`] is that narrow capability set.
//!
//! Two capability variants are recognized, detected by [`ScaleKind::detect`]:
//!
//! - **Discrete** (banded): reports a `bandwidth`; an entry's selection
//!   position is the center of its band
//! - **Continuous**: supports `invert`; an entry's selection position is the
//!   raw mapped position
//!
//! A scale with neither capability is a configuration error.
//!
//! [`BandScale`] and [`LinearScale`] are ready-made implementations for hosts
//! and tests; [`ScaleConfig`] builds either from serialized settings.

mod band;
mod linear;

pub use band::BandScale;
pub use linear::LinearScale;

use serde::Deserialize;

use crate::error::StackError;

/// What is being positioned: a category key or a numeric value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleKey<'a> {
    Category(&'a str),
    Value(f64),
}

/// Capability set a host scale exposes to the selection engine.
pub trait ScaleAdapter {
    /// Pixel position of `key`, or `None` if the scale cannot map it.
    fn position_of(&self, key: &ScaleKey<'_>) -> Option<f64>;

    /// Band width in pixels. Only discrete scales return a value.
    fn bandwidth(&self) -> Option<f64> {
        None
    }

    /// Whether [`invert`](Self::invert) is supported.
    fn can_invert(&self) -> bool {
        false
    }

    /// Value under `pixel`. Only continuous scales return a value.
    fn invert(&self, _pixel: f64) -> Option<f64> {
        None
    }
}

/// The capability variant of a scale, detected once when it is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleKind {
    Discrete { bandwidth: f64 },
    Continuous,
}

impl ScaleKind {
    /// Detects which capability `scale` provides.
    ///
    /// # Errors
    /// Returns [`StackError::Configuration`] when the scale has neither a
    /// bandwidth nor an inverse.
    pub fn detect(scale: &dyn ScaleAdapter) -> Result<Self, StackError> {
        if let Some(bandwidth) = scale.bandwidth() {
            return Ok(ScaleKind::Discrete { bandwidth });
        }
        if scale.can_invert() {
            return Ok(ScaleKind::Continuous);
        }
        Err(StackError::Configuration {
            message: "scale provides neither bandwidth nor invert".to_string(),
        })
    }

    /// Position used for selection tests: band center or raw position.
    pub fn selection_position(&self, scale: &dyn ScaleAdapter, key: &ScaleKey<'_>) -> Option<f64> {
        let position = scale.position_of(key)?;
        let position = match self {
            ScaleKind::Discrete { bandwidth } => position + bandwidth / 2.0,
            ScaleKind::Continuous => position,
        };
        position.is_finite().then_some(position)
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, ScaleKind::Discrete { .. })
    }
}

/// Serialized scale settings.
///
/// ```
/// use stackbrush::scale::ScaleConfig;
///
/// let config: ScaleConfig = serde_json::from_str(
///     r#"{"type": "band", "domain": ["A", "B"], "range": [0, 200], "paddingInner": 0.1}"#,
/// ).unwrap();
/// let scale = config.build().unwrap();
/// assert!(scale.bandwidth().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleConfig {
    #[serde(rename_all = "camelCase")]
    Band {
        domain: Vec<String>,
        range: (f64, f64),
        #[serde(default)]
        padding_inner: f64,
        #[serde(default)]
        padding_outer: f64,
        #[serde(default = "default_align")]
        align: f64,
    },
    Linear {
        domain: (f64, f64),
        range: (f64, f64),
    },
}

fn default_align() -> f64 {
    0.5
}

impl ScaleConfig {
    /// Parses settings from JSON.
    ///
    /// # Errors
    /// Returns [`StackError::Configuration`] for unknown scale types and
    /// malformed settings.
    pub fn from_json(json: &str) -> Result<Self, StackError> {
        serde_json::from_str(json).map_err(|err| StackError::Configuration {
            message: format!("invalid scale config: {}", err),
        })
    }

    /// Builds the configured scale.
    ///
    /// # Errors
    /// Returns [`StackError::Configuration`] for an empty band domain or
    /// non-finite bounds.
    pub fn build(&self) -> Result<Box<dyn ScaleAdapter>, StackError> {
        match self {
            ScaleConfig::Band {
                domain,
                range,
                padding_inner,
                padding_outer,
                align,
            } => {
                let scale = BandScale::try_new(domain.clone())?
                    .range(*range)
                    .padding_inner(*padding_inner)
                    .padding_outer(*padding_outer)
                    .align(*align);
                Ok(Box::new(scale))
            }
            ScaleConfig::Linear { domain, range } => {
                let bounds = [domain.0, domain.1, range.0, range.1];
                if bounds.iter().any(|b| !b.is_finite()) {
                    return Err(StackError::Configuration {
                        message: "linear scale bounds must be finite".to_string(),
                    });
                }
                Ok(Box::new(LinearScale::new(*domain, *range)))
            }
        }
    }
}
