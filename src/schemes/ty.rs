use std::collections::BTreeMap;
use rgb::RGB8;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Key of the fallback color of categorical schemes.
pub(crate) const DEFAULT_KEY: &str = "default";

/// Colors keyed by category, with a fallback.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CategoricalData {
    pub(crate) colors: BTreeMap<String, RGB8>, // never contains `DEFAULT_KEY`
    pub(crate) default: RGB8,
}

impl CategoricalData {
    pub(crate) fn new<'a>(default: RGB8,
                          colors: impl IntoIterator<Item = (&'a str, RGB8)>)
                          -> Self {
        let colors = colors.into_iter()
            .filter(|(k, _)| *k != DEFAULT_KEY)
            .map(|(k, c)| (k.to_string(), c))
            .collect();
        CategoricalData { colors, default }
    }
}

/// A range of a [`Density`][crate::Density] scheme: scalars in
/// (previous `max`, `max`\] are mapped linearly from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityRange {
    /// Upper bound of the range, in (0, 1\].
    pub max: f64,
    /// Color of the lower bound.
    pub start: RGB8,
    /// Color of `max`.
    pub end: RGB8,
}

/// Consecutive ranges covering \[0, 1\].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DensityData {
    // Invariant: non-empty, `max` strictly increasing in (0, 1], last
    // `max` is 1.
    pub(crate) ranges: Vec<DensityRange>,
}

impl DensityData {
    pub(crate) fn new(ranges: Vec<DensityRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::InvalidRanges("no range".into()))
        }
        let mut lo = 0.;
        for (i, r) in ranges.iter().enumerate() {
            if !r.max.is_finite() || r.max <= lo || r.max > 1. {
                return Err(Error::InvalidRanges(format!(
                    "range {i}: max = {} must be in ({lo}, 1]", r.max)))
            }
            lo = r.max;
        }
        if lo != 1. {
            return Err(Error::InvalidRanges(format!(
                "last max = {lo} does not reach 1")))
        }
        Ok(DensityData { ranges })
    }
}

/// A scheme definition, read from and written to the JSON shape
/// consumed by the front end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScheme", into = "RawScheme")]
pub(crate) enum SchemeData {
    Categorical(CategoricalData),
    Density(DensityData),
}

type Triple = [u8; 3];

#[inline]
fn rgb8([r, g, b]: Triple) -> RGB8 { RGB8 { r, g, b } }

#[inline]
fn triple(c: RGB8) -> Triple { [c.r, c.g, c.b] }

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawScheme {
    Density(RawDensity),
    Categorical(BTreeMap<String, Triple>),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDensity {
    ranges: Vec<RawRange>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawRange {
    max: f64,
    start_color: Triple,
    end_color: Triple,
}

impl TryFrom<RawScheme> for SchemeData {
    type Error = Error;

    fn try_from(raw: RawScheme) -> Result<Self> {
        match raw {
            RawScheme::Density(RawDensity { ranges }) => {
                let ranges = ranges.into_iter()
                    .map(|r| DensityRange { max: r.max,
                                            start: rgb8(r.start_color),
                                            end: rgb8(r.end_color) })
                    .collect();
                Ok(SchemeData::Density(DensityData::new(ranges)?))
            }
            RawScheme::Categorical(mut colors) => {
                let default = colors.remove(DEFAULT_KEY)
                    .ok_or(Error::MissingDefault)?;
                let colors = colors.into_iter()
                    .map(|(k, c)| (k, rgb8(c))).collect();
                Ok(SchemeData::Categorical(
                    CategoricalData { colors, default: rgb8(default) }))
            }
        }
    }
}

impl From<SchemeData> for RawScheme {
    fn from(s: SchemeData) -> Self {
        match s {
            SchemeData::Categorical(c) => {
                let mut colors: BTreeMap<_, _> = c.colors.into_iter()
                    .map(|(k, c)| (k, triple(c))).collect();
                colors.insert(DEFAULT_KEY.to_string(), triple(c.default));
                RawScheme::Categorical(colors)
            }
            SchemeData::Density(d) => RawScheme::Density(RawDensity {
                ranges: d.ranges.into_iter()
                    .map(|r| RawRange { max: r.max,
                                        start_color: triple(r.start),
                                        end_color: triple(r.end) })
                    .collect()
            }),
        }
    }
}
