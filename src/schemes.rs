//! Categorical and continuous color schemes.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use log::trace;
use serde::{Deserialize, Serialize};
use crate::{ColorRange, Error, Gradient, RGBColor, Result};

pub(crate) mod builtin;
mod ty;
use ty::{CategoricalData, DensityData, SchemeData};
pub use ty::DensityRange;

/// A color scheme mapping category keys to colors.
///
/// Created by [`RGBColor::people`], [`RGBColor::gender`] or looked up
/// in a [`SchemeSet`].
#[derive(Clone, Copy)]
pub struct Categorical<'a, Color> {
    name: &'a str,
    data: &'a CategoricalData,
    color: PhantomData<Color>,
}

impl<'a, Color: RGBColor> Categorical<'a, Color> {
    pub(crate) fn new(name: &'a str, data: &'a CategoricalData) -> Self {
        Self { name, data, color: PhantomData }
    }

    /// Name of the scheme.
    pub fn name(&self) -> &'a str { self.name }

    /// Returns the color of the category `key`, or the
    /// [default color][Self::default_color] if the scheme has no
    /// color for `key`.
    pub fn color(&self, key: &str) -> Color {
        let c = match self.data.colors.get(key) {
            Some(c) => *c,
            None => {
                trace!("scheme {}: no color for {key:?}, using default",
                       self.name);
                self.data.default
            }
        };
        Color::from_rgba(c.to_rgba())
    }

    /// The color of keys not otherwise mapped.
    pub fn default_color(&self) -> Color {
        Color::from_rgba(self.data.default.to_rgba())
    }

    /// Returns the keys having their own color (`"default"` excluded),
    /// in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        let data = self.data;
        data.colors.keys().map(|k| k.as_str())
    }

    /// Returns the number of keys having their own color.
    pub fn len(&self) -> usize { self.data.colors.len() }

    /// Says whether all keys are mapped to the default color.
    pub fn is_empty(&self) -> bool { self.data.colors.is_empty() }
}

/// A continuous color scheme: \[0, 1\] is split into consecutive
/// [`DensityRange`]s and each range blends linearly between its
/// start and end colors.
///
/// See the [`ColorRange`] trait for methods.
#[derive(Clone, Copy)]
pub struct Density<'a, Color> {
    name: &'a str,
    data: &'a DensityData,
    color: PhantomData<Color>,
}

impl<'a, Color: RGBColor> Density<'a, Color> {
    pub(crate) fn new(name: &'a str, data: &'a DensityData) -> Self {
        Self { name, data, color: PhantomData }
    }

    /// Name of the scheme.
    pub fn name(&self) -> &'a str { self.name }

    /// The ranges of the scheme, by increasing `max`.  The last
    /// `max` is `1.`.
    pub fn ranges(&self) -> &'a [DensityRange] {
        let data = self.data;
        &data.ranges
    }

    /// Says whether the color is continuous across the ranges, that
    /// is whether each range starts with the end color of the
    /// previous one.
    pub fn is_continuous(&self) -> bool {
        self.data.ranges.windows(2).all(|r| r[0].end == r[1].start)
    }

    /// Returns the color corresponding to `t` ∈ \[0., 1.\] or an error
    /// if `t` is outside that interval (or NaN).
    ///
    /// ```
    /// use rgb::RGB8;
    /// use pointillism::RGBColor;
    /// let density = RGB8::density();
    /// assert_eq!(density.try_rgb(0.).unwrap(), RGB8::new(158, 1, 66));
    /// assert!(density.try_rgb(1.5).is_err());
    /// ```
    pub fn try_rgb(&self, t: f64) -> Result<Color> {
        if (0. ..= 1.).contains(&t) { Ok(self.rgb_unsafe(t)) }
        else { Err(Error::OutOfRange(t)) }
    }

    /// Assume `t` ∈ \[0., 1.\].
    fn rgb_unsafe(&self, t: f64) -> Color {
        let ranges = &self.data.ranges;
        let i = ranges.partition_point(|r| r.max < t).min(ranges.len() - 1);
        let lo = if i == 0 { 0. } else { ranges[i - 1].max };
        let r = &ranges[i];
        Gradient::between(r.start.to_rgba(), r.end.to_rgba())
            .rgb_unsafe((t - lo) / (r.max - lo))
    }
}

impl<'a, Color> ColorRange<Color> for Density<'a, Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t`, clamped to \[0., 1.\].
    /// NaN is treated as `0.`.
    fn rgb(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
        self.rgb_unsafe(t)
    }
}

/// Any color scheme.
#[derive(Clone, Copy)]
pub enum Scheme<'a, Color> {
    Categorical(Categorical<'a, Color>),
    Density(Density<'a, Color>),
}

/// The value to color with a [`Scheme`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input<'k> {
    /// A category key, for [`Categorical`] schemes.
    Key(&'k str),
    /// A scalar in \[0, 1\], for [`Density`] schemes.
    Value(f64),
}

impl<'k> From<&'k str> for Input<'k> {
    fn from(k: &'k str) -> Self { Input::Key(k) }
}

impl From<f64> for Input<'_> {
    fn from(t: f64) -> Self { Input::Value(t) }
}

impl<'a, Color: RGBColor> Scheme<'a, Color> {
    /// Name of the scheme.
    pub fn name(&self) -> &'a str {
        match self {
            Scheme::Categorical(c) => c.name(),
            Scheme::Density(d) => d.name(),
        }
    }

    /// Interpret `value` as the input kind of the scheme: a key for
    /// categorical schemes, a number for continuous ones.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use pointillism::{RGBColor, Input};
    /// let density = RGB8::scheme("density").unwrap();
    /// assert_eq!(density.parse_input("0.5").unwrap(), Input::Value(0.5));
    /// assert!(density.parse_input("m").is_err());
    /// ```
    pub fn parse_input<'k>(&self, value: &'k str) -> Result<Input<'k>> {
        match self {
            Scheme::Categorical(_) => Ok(Input::Key(value)),
            Scheme::Density(_) => value.trim().parse()
                .map(Input::Value)
                .map_err(|_| Error::NotANumber(value.to_string())),
        }
    }

    /// Returns the color of `input`.  Scalars outside \[0, 1\] are
    /// rejected, as well as inputs of the wrong kind for the scheme.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use pointillism::{RGBColor, Input};
    /// let gender = RGB8::scheme("gender").unwrap();
    /// assert_eq!(gender.color(Input::Key("m")).unwrap(),
    ///            RGB8::new(0, 255, 255));
    /// assert!(gender.color(Input::Value(0.5)).is_err());
    /// ```
    pub fn color<'k>(&self, input: impl Into<Input<'k>>) -> Result<Color> {
        match (self, input.into()) {
            (Scheme::Categorical(c), Input::Key(k)) => Ok(c.color(k)),
            (Scheme::Density(d), Input::Value(t)) => d.try_rgb(t),
            (Scheme::Categorical(c), Input::Value(_)) =>
                Err(Error::WrongInput { scheme: c.name().to_string(),
                                        expected: "a category key" }),
            (Scheme::Density(d), Input::Key(_)) =>
                Err(Error::WrongInput { scheme: d.name().to_string(),
                                        expected: "a value in [0, 1]" }),
        }
    }
}

/// A set of named color schemes.
///
/// The JSON form maps each name either to a categorical scheme,
/// `{"m": [0, 255, 255], "default": [220, 220, 220]}`, or to a
/// continuous one, `{"ranges": [{"max": 1.0, "startColor": [0, 0, 0],
/// "endColor": [255, 255, 255]}]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeSet {
    schemes: BTreeMap<String, SchemeData>,
}

impl SchemeSet {
    pub(crate) fn from_data<'a>(
        schemes: impl IntoIterator<Item = (&'a str, SchemeData)>) -> Self {
        SchemeSet { schemes: schemes.into_iter()
                    .map(|(n, s)| (n.to_string(), s)).collect() }
    }

    /// The built-in schemes: `people`, `gender` and `density`.
    pub fn builtin() -> &'static SchemeSet { &builtin::BUILTIN }

    /// Read schemes from JSON, checking that categorical schemes have
    /// a `default` color and that density ranges cover \[0, 1\].
    /// A continuous scheme accepts no field besides `ranges`, and its
    /// ranges no field besides `max`, `startColor` and `endColor`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the schemes as (pretty-printed) JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the names of the schemes, in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(|n| n.as_str())
    }

    pub fn len(&self) -> usize { self.schemes.len() }

    pub fn is_empty(&self) -> bool { self.schemes.is_empty() }

    /// Returns the scheme `name`.
    pub fn get<Color: RGBColor>(&self, name: &str)
                                -> Result<Scheme<'_, Color>> {
        match self.schemes.get_key_value(name) {
            Some((n, SchemeData::Categorical(c))) =>
                Ok(Scheme::Categorical(Categorical::new(n, c))),
            Some((n, SchemeData::Density(d))) =>
                Ok(Scheme::Density(Density::new(n, d))),
            None => Err(Error::UnknownScheme(name.to_string())),
        }
    }
}


#[cfg(test)]
mod tests {
    use rgb::{RGB8, RGBA8};
    use super::*;

    #[test]
    fn unknown_keys_use_default() {
        for name in ["people", "gender"] {
            let Ok(Scheme::Categorical(c)) = RGB8::scheme(name) else {
                panic!("{name} is not categorical")
            };
            for key in ["", "x", "M", "default", "unknown"] {
                assert_eq!(c.color(key), c.default_color(), "{name}/{key}");
            }
        }
    }

    #[test]
    fn gender_colors() {
        let g = RGB8::gender();
        assert_eq!(g.color("m"), RGB8::new(0, 255, 255));
        assert_eq!(g.color("f"), RGB8::new(255, 20, 255));
        assert_eq!(g.default_color(), RGB8::new(220, 220, 220));
        assert_eq!(g.keys().collect::<Vec<_>>(), ["f", "m"]);
        let p = RGB8::people();
        assert!(p.is_empty());
        assert_eq!(p.color("anyone"), RGB8::new(100, 100, 100));
    }

    #[test]
    fn other_encodings() {
        assert_eq!(RGBA8::gender().color("f"), RGBA8::new(255, 20, 255, 255));
        assert_eq!(RGBA8::density().rgb(0.), RGBA8::new(158, 1, 66, 255));
    }

    #[test]
    fn density_ranges_cover_unit_interval() {
        let ranges = RGB8::density().ranges();
        assert!(ranges.windows(2).all(|r| r[0].max < r[1].max));
        assert!(ranges[0].max > 0.);
        assert_eq!(ranges.last().map(|r| r.max), Some(1.));
        assert!(RGB8::density().is_continuous());
    }

    #[test]
    fn density_bounds() {
        let d = RGB8::density();
        assert_eq!(d.rgb(0.), RGB8::new(158, 1, 66));
        assert_eq!(d.rgb(1.), RGB8::new(213, 62, 79));
        // At each boundary, the end of a range is the start of the next.
        for w in d.ranges().windows(2) {
            assert_eq!(d.rgb(w[0].max), w[0].end);
            assert_eq!(d.rgb(w[0].max), w[1].start);
        }
    }

    #[test]
    fn density_interpolates() {
        let d = RGB8::density();
        assert_eq!(d.rgb(0.05), RGB8::new(157, 54, 87));
        assert_eq!(d.rgb(0.1), RGB8::new(156, 107, 107));
    }

    #[test]
    fn density_clamps() {
        let d = RGB8::density();
        assert_eq!(d.rgb(-0.5), d.rgb(0.));
        assert_eq!(d.rgb(f64::NEG_INFINITY), d.rgb(0.));
        assert_eq!(d.rgb(1.5), d.rgb(1.));
        assert_eq!(d.rgb(f64::NAN), d.rgb(0.));
    }

    #[test]
    fn density_strict() {
        let d = RGB8::density();
        assert!(matches!(d.try_rgb(-0.1), Err(Error::OutOfRange(_))));
        assert!(matches!(d.try_rgb(1.1), Err(Error::OutOfRange(_))));
        assert!(matches!(d.try_rgb(f64::NAN), Err(Error::OutOfRange(_))));
        assert_eq!(d.try_rgb(0.1).unwrap(), d.rgb(0.1));
    }

    #[test]
    fn scheme_inputs() {
        let density = RGB8::scheme("density").unwrap();
        assert_eq!(density.name(), "density");
        assert_eq!(density.color(1.).unwrap(), RGB8::new(213, 62, 79));
        assert!(matches!(density.color("m"),
                         Err(Error::WrongInput { .. })));
        assert!(matches!(density.color(2.), Err(Error::OutOfRange(_))));
        let gender = RGB8::scheme("gender").unwrap();
        assert_eq!(gender.color("x").unwrap(), RGB8::new(220, 220, 220));
        assert!(matches!(RGB8::scheme("age"),
                         Err(Error::UnknownScheme(n)) if n == "age"));
    }

    #[test]
    fn builtin_names() {
        let names: Vec<_> = SchemeSet::builtin().names().collect();
        assert_eq!(names, ["density", "gender", "people"]);
    }

    #[test]
    fn json_round_trip_of_builtin() {
        let json = SchemeSet::builtin().to_json().unwrap();
        assert!(json.contains("\"startColor\""));
        let set = SchemeSet::from_json(&json).unwrap();
        assert_eq!(&set, SchemeSet::builtin());
    }

    #[test]
    fn json_custom_schemes() {
        let set = SchemeSet::from_json(r#"{
            "age": {"young": [0, 0, 255], "old": [255, 0, 0],
                    "default": [9, 9, 9]},
            "heat": {"ranges": [
                {"max": 0.5, "startColor": [0, 0, 0],
                 "endColor": [100, 100, 100]},
                {"max": 1.0, "startColor": [200, 200, 200],
                 "endColor": [255, 255, 255]}]}
        }"#).unwrap();
        assert_eq!(set.len(), 2);
        let Ok(Scheme::Categorical(age)) = set.get::<RGB8>("age") else {
            panic!("age is not categorical")
        };
        assert_eq!(age.color("old"), RGB8::new(255, 0, 0));
        assert_eq!(age.color("baby"), RGB8::new(9, 9, 9));
        let Ok(Scheme::Density(heat)) = set.get::<RGB8>("heat") else {
            panic!("heat is not continuous")
        };
        assert!(!heat.is_continuous());
        assert_eq!(heat.rgb(0.25), RGB8::new(50, 50, 50));
        assert_eq!(heat.rgb(0.5), RGB8::new(100, 100, 100));
        assert_eq!(heat.rgb(0.75), RGB8::new(228, 228, 228));
    }

    #[test]
    fn json_missing_default() {
        let err = SchemeSet::from_json(r#"{"age": {"young": [0, 0, 255]}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("default"), "{err}");
    }

    #[test]
    fn json_invalid_ranges() {
        for ranges in [
            r#"[]"#,
            r#"[{"max": 0.5, "startColor": [0,0,0], "endColor": [0,0,0]}]"#,
            r#"[{"max": 0.6, "startColor": [0,0,0], "endColor": [0,0,0]},
                {"max": 0.4, "startColor": [0,0,0], "endColor": [0,0,0]},
                {"max": 1.0, "startColor": [0,0,0], "endColor": [0,0,0]}]"#,
            r#"[{"max": 0.0, "startColor": [0,0,0], "endColor": [0,0,0]},
                {"max": 1.0, "startColor": [0,0,0], "endColor": [0,0,0]}]"#,
            r#"[{"max": 1.5, "startColor": [0,0,0], "endColor": [0,0,0]}]"#,
        ] {
            let json = format!(r#"{{"d": {{"ranges": {ranges}}}}}"#);
            let err = SchemeSet::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("invalid density ranges"),
                    "{ranges}: {err}");
        }
    }

    #[test]
    fn json_mixed_shapes() {
        let err = SchemeSet::from_json(r#"{"d": {
            "ranges": [{"max": 1.0, "startColor": [0, 0, 0],
                        "endColor": [9, 9, 9]}],
            "default": [1, 2, 3], "m": [4, 5, 6]}}"#);
        assert!(err.is_err());
        let err = SchemeSet::from_json(r#"{"d": {"ranges": [
            {"max": 1.0, "startColor": [0, 0, 0], "endColor": [9, 9, 9],
             "midColor": [5, 5, 5]}]}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn parse_inputs() {
        let gender = RGB8::scheme("gender").unwrap();
        assert_eq!(gender.parse_input("-0.5").unwrap(), Input::Key("-0.5"));
        let density = RGB8::scheme("density").unwrap();
        let t = density.parse_input("-0.5").unwrap();
        assert_eq!(t, Input::Value(-0.5));
        assert!(matches!(density.color(t), Err(Error::OutOfRange(_))));
        assert!(matches!(density.parse_input("dense"),
                         Err(Error::NotANumber(v)) if v == "dense"));
    }

    #[test]
    fn json_components_are_bytes() {
        assert!(SchemeSet::from_json(
            r#"{"p": {"default": [256, 0, 0]}}"#).is_err());
        assert!(SchemeSet::from_json(
            r#"{"p": {"default": [-1, 0, 0]}}"#).is_err());
        assert!(SchemeSet::from_json(
            r#"{"p": {"default": [1, 2]}}"#).is_err());
    }
}
