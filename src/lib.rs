//! Color schemes for population pointillism maps.
//!
//! Every point drawn on the map gets its color from a named scheme:
//!
//! - [`Categorical`] schemes map a category key (e.g. `"m"` or `"f"`
//!   for gender) to a color, with a `default` color for keys they do
//!   not know;
//! - the [`Density`] scheme maps a normalized scalar in \[0, 1\] to a
//!   color by blending linearly inside consecutive ranges.
//!
//! The built-in schemes are `people`, `gender` and `density` (see
//! [`SchemeSet::builtin`]).  The [`config`] module holds the build
//! configuration of the static site that renders them.
//!
//! ```
//! use rgb::RGB8;
//! use pointillism::{RGBColor, ColorRange};
//! assert_eq!(RGB8::gender().color("f"), RGB8::new(255, 20, 255));
//! assert_eq!(RGB8::gender().color("?"), RGB8::new(220, 220, 220));
//! assert_eq!(RGB8::density().rgb(1.), RGB8::new(213, 62, 79));
//! ```

use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGB16, RGBA8, RGBA16};

pub mod config;
mod error;
mod schemes;

pub use error::{Error, Result};
pub use schemes::{Categorical, Density, DensityRange, Input, Scheme,
                  SchemeSet};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with colors.  It is not required
    /// that `a <= b`.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use pointillism::{RGBColor, ColorRange};
    /// let legend: Vec<_> = RGB8::density().range(0., 100., 6).collect();
    /// assert_eq!(legend.len(), 6);
    /// assert_eq!(legend[5], (100., RGB8::new(213, 62, 79)));
    /// ```
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Range { range: self,  color: PhantomData,
                    a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self,  color: PhantomData,
                    a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed
    j: usize, // last position to be consumed (empty when i > j)
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    /// Return the float and RGB color of the position `k` (assuming
    /// it is in the range `0 ..= self.last`).
    fn rgb(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, R::rgb(&self.range, 0.))
        } else if k == self.last {
            (self.b, R::rgb(&self.range, 1.))
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let mut x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (x, R::rgb(&self.range, t))
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize { self.remaining() }
}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}

/// Specifies the methods a RGB color encoding must provide.
///
/// Components go through `RGBA<f64>` on the 8-bit scale \[0, 255\];
/// 16-bit encodings are rescaled to \[0, 65535\] (255 ↦ 65535).
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return a gradient from color `c0` to color `c1`, blending the
    /// components linearly.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use pointillism::{RGBColor, ColorRange};
    /// let red = RGB8::new(255, 0, 0);
    /// let blue = RGB8::new(0, 0, 255);
    /// let grad = red.gradient(&blue);
    /// assert_eq!(grad.rgb(0.5), RGB8::new(128, 0, 128));
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        Gradient::between(self.to_rgba(), c1.to_rgba())
    }

    /// The color scheme named `name` among the built-in ones.
    fn scheme(name: &str) -> Result<Scheme<'static, Self>> {
        SchemeSet::builtin().get(name)
    }

    /// Color of a person when no attribute is mapped.
    #[inline]
    fn people() -> Categorical<'static, Self> {
        Categorical::new("people", &schemes::builtin::PEOPLE)
    }

    /// Colors by gender: cyan for `"m"`, magenta for `"f"`, light gray
    /// otherwise.
    #[inline]
    fn gender() -> Categorical<'static, Self> {
        Categorical::new("gender", &schemes::builtin::GENDER)
    }

    /// Density scheme going from dark red (sparse) through green,
    /// light yellow and orange to red (dense).
    #[inline]
    fn density() -> Density<'static, Self> {
        Density::new("density", &schemes::builtin::DENSITY)
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGBA{ r, g, b, a } = Self::to_rgba(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgba(RGBA{ r: x, g: x, b: x, a })
    }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

// Float to integer `as` casts saturate, and NaN becomes 0.

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

const SCALE16: f64 = 257.; // 65535 / 255

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 / SCALE16, g: self.g as f64 / SCALE16,
              b: self.b as f64 / SCALE16, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: (SCALE16 * c.r).round() as u16,
                g: (SCALE16 * c.g).round() as u16,
                b: (SCALE16 * c.b).round() as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r.round() as u8,  g: c.g.round() as u8,
                b: c.b.round() as u8, a: c.a.round() as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 / SCALE16, g: self.g as f64 / SCALE16,
              b: self.b as f64 / SCALE16, a: self.a as f64 / SCALE16 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: (SCALE16 * c.r).round() as u16,
                 g: (SCALE16 * c.g).round() as u16,
                 b: (SCALE16 * c.b).round() as u16,
                 a: (SCALE16 * c.a).round() as u16 }
    }
}


/// Linear gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
pub struct Gradient<Color> {
    c0: RGBA<f64>, // first color
    dc: RGBA<f64>, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    pub(crate) fn between(c0: RGBA<f64>, c1: RGBA<f64>) -> Self {
        Gradient { c0,
                   dc: RGBA { r: c1.r - c0.r, g: c1.g - c0.g,
                              b: c1.b - c0.b, a: c1.a - c0.a },
                   color: PhantomData }
    }

    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does
    /// not check the later condition.
    #[inline]
    pub(crate) fn rgb_unsafe(&self, t: f64) -> Color {
        Color::from_rgba(RGBA { r: self.c0.r + t * self.dc.r,
                                g: self.c0.g + t * self.dc.g,
                                b: self.c0.b + t * self.dc.b,
                                a: self.c0.a + t * self.dc.a })
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unsafe(t.clamp(0., 1.)) }
}
