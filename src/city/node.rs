use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::RouteError;


/// Identity of an intersection: its grid coordinates.
///
/// The textual form `"x-y"` is what the rendering layer uses; it is produced by
/// `Display` and read back by `FromStr`, and it is how ids serialize.
/// Ordering is the lexicographic order of that text, so `"10-0" < "2-0"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub x: u32,
    pub y: u32,
}

impl NodeId {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Intersections where both coordinates are even carry a traffic signal
    pub fn is_signalized(&self) -> bool {
        self.x % 2 == 0 && self.y % 2 == 0
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        // '-' sorts below every digit, so a shorter x that prefixes a longer one comes first,
        // which is exactly what comparing the digit slices gives
        cmp_decimal(self.x, other.x).then_with(|| cmp_decimal(self.y, other.y))
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two numbers by their decimal text
fn cmp_decimal(a: u32, b: u32) -> Ordering {
    let (mut a_buf, mut b_buf) = ([0u8; 10], [0u8; 10]);
    decimal_digits(a, &mut a_buf).cmp(decimal_digits(b, &mut b_buf))
}

fn decimal_digits(mut value: u32, buf: &mut [u8; 10]) -> &[u8] {
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buf[start..]
}

/// Canonical decimal only: no sign, no leading zeros
fn parse_coordinate(text: &str) -> Option<u32> {
    let canonical = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));
    if canonical { text.parse().ok() } else { None }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for NodeId {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RouteError::InvalidNodeId(s.to_string());

        let (x, y) = s.split_once('-').ok_or_else(invalid)?;
        let x = parse_coordinate(x).ok_or_else(invalid)?;
        let y = parse_coordinate(y).ok_or_else(invalid)?;

        Ok(Self { x, y })
    }
}

impl From<(u32, u32)> for NodeId {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


/// An intersection in the node catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub x: u32,
    pub y: u32,
}

impl Node {
    pub fn new(x: u32, y: u32) -> Self {
        Self { id: NodeId::new(x, y), x, y }
    }
}
