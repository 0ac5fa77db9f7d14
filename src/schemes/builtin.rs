use lazy_static::lazy_static;
use rgb::RGB8;
use super::SchemeSet;
use super::ty::*;

const fn rgb(r: u8, g: u8, b: u8) -> RGB8 { RGB8 { r, g, b } }

lazy_static! {
  pub(crate) static ref PEOPLE: CategoricalData =
    CategoricalData::new(rgb(100, 100, 100), std::iter::empty());

  pub(crate) static ref GENDER: CategoricalData =
    CategoricalData::new(rgb(220, 220, 220),
                         [("m", rgb(0, 255, 255)),
                          ("f", rgb(255, 20, 255))]);

  pub(crate) static ref DENSITY: DensityData = DensityData {
    ranges: vec![
      DensityRange { max: 0.2, start: rgb(158, 1, 66),
                     end: rgb(153, 213, 148) },
      DensityRange { max: 0.4, start: rgb(153, 213, 148),
                     end: rgb(230, 245, 152) },
      DensityRange { max: 0.6, start: rgb(230, 245, 152),
                     end: rgb(254, 224, 139) },
      DensityRange { max: 0.8, start: rgb(254, 224, 139),
                     end: rgb(253, 174, 97) },
      DensityRange { max: 1.0, start: rgb(253, 174, 97),
                     end: rgb(213, 62, 79) },
    ]
  };

  pub(crate) static ref BUILTIN: SchemeSet = SchemeSet::from_data([
    ("people", SchemeData::Categorical(PEOPLE.clone())),
    ("gender", SchemeData::Categorical(GENDER.clone())),
    ("density", SchemeData::Density(DENSITY.clone())),
  ]);
}
