//! Minimal netCDF classic header parser.
//!
//! Velocity granules carry their centerpoint as `latitude`/`longitude`
//! attributes of the `img_pair_info` variable. Everything needed lives in
//! the file header, so this parser walks the header structure of the
//! classic (CDF-1) and 64-bit-offset (CDF-2) layouts and never touches
//! variable data.

use super::{CenterPoint, GranuleError};

const NC_DIMENSION: u32 = 0x0A;
const NC_VARIABLE: u32 = 0x0B;
const NC_ATTRIBUTE: u32 = 0x0C;

/// Variable carrying the centerpoint attributes.
const CENTER_VAR: &str = "img_pair_info";
const LAT_ATTR: &str = "latitude";
const LON_ATTR: &str = "longitude";

/// Extract the granule centerpoint from the leading bytes of a netCDF
/// classic file.
///
/// Attributes of the `img_pair_info` variable take precedence; older
/// products carry the same fields as global attributes.
pub fn extract_center_point(bytes: &[u8]) -> Result<CenterPoint, GranuleError> {
    let header = Header::parse(bytes)?;

    let (mut lat, mut lon) = match header.variable_attrs(CENTER_VAR) {
        Some(attrs) => (numeric_attr(attrs, LAT_ATTR), numeric_attr(attrs, LON_ATTR)),
        None => (None, None),
    };

    lat = lat.or_else(|| numeric_attr(&header.global_attrs, LAT_ATTR));
    lon = lon.or_else(|| numeric_attr(&header.global_attrs, LON_ATTR));

    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(CenterPoint { lat, lon }),
        _ => Err(GranuleError::MissingCenterPoint(format!(
            "no {}/{} attributes on {} or globally",
            LAT_ATTR, LON_ATTR, CENTER_VAR
        ))),
    }
}

#[derive(Debug)]
struct Attribute {
    name: String,
    /// First element of a numeric attribute; char attributes carry None.
    value: Option<f64>,
}

#[derive(Debug)]
struct Variable {
    name: String,
    attrs: Vec<Attribute>,
}

#[derive(Debug)]
struct Header {
    global_attrs: Vec<Attribute>,
    variables: Vec<Variable>,
}

impl Header {
    fn parse(bytes: &[u8]) -> Result<Self, GranuleError> {
        let mut cursor = Cursor::new(bytes);

        let magic = cursor.take(4)?;
        if &magic[..3] != b"CDF" {
            return Err(GranuleError::NotNetcdf);
        }
        let wide_offsets = match magic[3] {
            1 => false,
            2 => true,
            _ => return Err(GranuleError::NotNetcdf),
        };

        // numrecs (or the streaming marker), unused here
        cursor.read_u32()?;

        // dim_list: names and lengths are irrelevant, only walked past
        let ndims = cursor.read_tagged_count(NC_DIMENSION)?;
        for _ in 0..ndims {
            cursor.skip_name()?;
            cursor.read_u32()?; // dim length
        }

        let global_attrs = cursor.read_attr_list()?;

        let nvars = cursor.read_tagged_count(NC_VARIABLE)?;
        let mut variables = Vec::with_capacity(nvars as usize);
        for _ in 0..nvars {
            let name = cursor.read_name()?;
            let rank = cursor.read_u32()?;
            for _ in 0..rank {
                cursor.read_u32()?; // dimid
            }
            let attrs = cursor.read_attr_list()?;
            cursor.read_u32()?; // nc_type
            cursor.read_u32()?; // vsize
            cursor.take(if wide_offsets { 8 } else { 4 })?; // begin offset
            variables.push(Variable { name, attrs });
        }

        Ok(Header {
            global_attrs,
            variables,
        })
    }

    fn variable_attrs(&self, name: &str) -> Option<&[Attribute]> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.attrs.as_slice())
    }
}

fn numeric_attr(attrs: &[Attribute], name: &str) -> Option<f64> {
    attrs.iter().find(|a| a.name == name).and_then(|a| a.value)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], GranuleError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(GranuleError::TruncatedHeader)?;
        if end > self.bytes.len() {
            return Err(GranuleError::TruncatedHeader);
        }
        let out = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn read_u32(&mut self) -> Result<u32, GranuleError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// List headers are a tag word and an element count; an absent list is
    /// encoded as two zero words.
    fn read_tagged_count(&mut self, expected_tag: u32) -> Result<u32, GranuleError> {
        let tag = self.read_u32()?;
        let count = self.read_u32()?;
        if tag == 0 {
            if count != 0 {
                return Err(GranuleError::MalformedHeader(
                    "absent list with nonzero count".to_string(),
                ));
            }
            return Ok(0);
        }
        if tag != expected_tag {
            return Err(GranuleError::MalformedHeader(format!(
                "expected list tag {:#x}, found {:#x}",
                expected_tag, tag
            )));
        }
        Ok(count)
    }

    fn read_name(&mut self) -> Result<String, GranuleError> {
        let len = self.read_u32()? as usize;
        let raw = self.take(padded(len))?;
        Ok(String::from_utf8_lossy(&raw[..len]).into_owned())
    }

    fn skip_name(&mut self) -> Result<(), GranuleError> {
        let len = self.read_u32()? as usize;
        self.take(padded(len))?;
        Ok(())
    }

    fn read_attr_list(&mut self) -> Result<Vec<Attribute>, GranuleError> {
        let count = self.read_tagged_count(NC_ATTRIBUTE)?;
        let mut attrs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let name = self.read_name()?;
            let nc_type = self.read_u32()?;
            let nelems = self.read_u32()? as usize;
            let raw = self.take(padded(nelems * type_size(nc_type)?))?;
            let value = if nelems > 0 {
                first_numeric(nc_type, raw)
            } else {
                None
            };
            attrs.push(Attribute { name, value });
        }
        Ok(attrs)
    }
}

/// Round up to the 4-byte alignment all header lists are padded to.
fn padded(n: usize) -> usize {
    (n + 3) & !3
}

fn type_size(nc_type: u32) -> Result<usize, GranuleError> {
    match nc_type {
        1 | 2 => Ok(1), // byte, char
        3 => Ok(2),     // short
        4 | 5 => Ok(4), // int, float
        6 => Ok(8),     // double
        other => Err(GranuleError::MalformedHeader(format!(
            "unknown attribute type {}",
            other
        ))),
    }
}

/// Decode the first element of a numeric attribute.
fn first_numeric(nc_type: u32, raw: &[u8]) -> Option<f64> {
    match nc_type {
        1 if !raw.is_empty() => Some(raw[0] as i8 as f64),
        3 if raw.len() >= 2 => Some(i16::from_be_bytes([raw[0], raw[1]]) as f64),
        4 if raw.len() >= 4 => Some(i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64),
        5 if raw.len() >= 4 => Some(f32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64),
        6 if raw.len() >= 8 => Some(f64::from_be_bytes([
            raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7],
        ])),
        _ => None,
    }
}
