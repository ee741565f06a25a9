/// STL mesh source for binary and ASCII files
///
/// Facets are decoded into triangles and then reduced to the unique edges
/// the wireframe pipeline consumes. Facet normals are read and discarded.
use log::{debug, warn};
use nom::{
    bytes::complete::{tag, take, take_till},
    character::complete::{multispace0, multispace1},
    multi::{count, many0},
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Result, StlError};
use crate::geometry::Mesh;
use crate::vector::Vec3;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

type Triangle = [Vec3; 3];

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooSmall(data.len()).into());
    }

    let (body, triangle_count) = binary_header(data).map_err(|_| StlError::TooSmall(data.len()))?;
    let expected = HEADER_LEN + 4 + triangle_count as usize * FACET_LEN;
    if data.len() < expected {
        return Err(StlError::Truncated {
            expected,
            actual: data.len(),
        }
        .into());
    }

    let (_, triangles) = count(binary_facet, triangle_count as usize)(body).map_err(|_| {
        StlError::Truncated {
            expected,
            actual: data.len(),
        }
    })?;

    debug!("decoded {} binary STL facets", triangles.len());
    triangles_to_mesh(triangles)
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(HEADER_LEN), le_u32)(input)
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], Vec3> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Triangle> {
    let (input, _normal) = binary_vector(input)?;
    let (input, (a, b, c)) = tuple((binary_vector, binary_vector, binary_vector))(input)?;
    // Attribute byte count
    let (input, _) = le_u16(input)?;
    Ok((input, [a, b, c]))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    let (_, triangles) =
        ascii_solid(input).map_err(|e| StlError::Ascii(format!("{:?}", e)))?;
    debug!("decoded {} ASCII STL facets", triangles.len());
    triangles_to_mesh(triangles)
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<Triangle>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // Optional name runs to the end of the line
    let (input, _) = take_till(|c: char| c == '\n')(input)?;
    let (input, triangles) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, triangles))
}

fn ascii_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = ascii_vector(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, (a, b, c)) = tuple((ascii_vertex, ascii_vertex, ascii_vertex))(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [a, b, c]))
}

fn ascii_vertex(input: &str) -> IResult<&str, Vec3> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector)(input)
}

fn ascii_vector(input: &str) -> IResult<&str, Vec3> {
    let (input, x) = preceded(multispace0, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn triangles_to_mesh(triangles: Vec<Triangle>) -> Result<Mesh> {
    let total = triangles.len();
    let finite: Vec<Triangle> = triangles
        .into_iter()
        .filter(|tri| tri.iter().all(|v| v.iter().all(|c| c.is_finite())))
        .collect();
    if finite.len() < total {
        warn!("skipped {} STL facets with non-finite coordinates", total - finite.len());
    }
    Mesh::from_triangles(&finite)
}

/// Detect and parse STL data (ASCII first when it looks like text, then binary)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            match parse_ascii_stl(text) {
                Ok(mesh) => return Ok(mesh),
                // Binary files may also start with "solid" in their header
                Err(e) => debug!("ASCII STL parse failed, trying binary: {}", e),
            }
        }
    }

    parse_binary_stl(data)
}
