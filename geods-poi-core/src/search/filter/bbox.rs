use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::search::PoiSearchError;

/// axis-aligned rectangle in longitude/latitude, written in
/// `left,bottom,right,top` order.
///
/// no ordering is enforced on construction or parsing: an inverted rectangle
/// is a legal value that matches nothing. use [`Bbox::validate`] to reject it.
#[derive(Clone, Debug, Serialize, Deserialize, Copy, PartialEq)]
pub struct Bbox {
    /// minimum longitude
    pub left: f64,
    /// minimum latitude
    pub bottom: f64,
    /// maximum longitude
    pub right: f64,
    /// maximum latitude
    pub top: f64,
}

impl Bbox {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// inclusive on all four edges, mirroring `BETWEEN` in the row source query.
    pub fn contains(&self, long: f64, lat: f64) -> bool {
        self.left <= long && long <= self.right && self.bottom <= lat && lat <= self.top
    }

    pub fn validate(&self) -> Result<(), PoiSearchError> {
        if self.right < self.left || self.top < self.bottom {
            return Err(PoiSearchError::InvalidBbox(format!(
                "bbox is inverted, expected left <= right and bottom <= top: {self}"
            )));
        }

        Ok(())
    }
}

impl FromStr for Bbox {
    type Err = PoiSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [left, bottom, right, top] = parts.as_slice() else {
            return Err(PoiSearchError::InvalidBbox(String::from(
                "bbox must have 4 comma-separated values",
            )));
        };
        Ok(Bbox::new(
            parse_value(left)?,
            parse_value(bottom)?,
            parse_value(right)?,
            parse_value(top)?,
        ))
    }
}

fn parse_value(part: &str) -> Result<f64, PoiSearchError> {
    part.trim().parse::<f64>().map_err(|_| {
        PoiSearchError::InvalidBbox(format!("invalid bbox value '{part}': not a valid float"))
    })
}

impl Display for Bbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.bottom, self.right, self.top)
    }
}
