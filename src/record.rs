//! Binary vehicle position records.
//!
//! Records are stored back to back with no header, all integers little-endian:
//!
//! | field         | encoding                         |
//! |---------------|----------------------------------|
//! | id            | `i32`                            |
//! | registration  | ASCII bytes, NUL terminated      |
//! | latitude      | `f32`                            |
//! | longitude     | `f32`                            |
//! | recorded at   | `u64` (seconds since the epoch)  |
//!
//! Coordinates are widened to `f64` on read and narrowed to `f32` on write.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::position::Vehicle;

/// Longest registration label accepted, excluding the terminator
pub const MAX_REGISTRATION_LEN: usize = 64;

/// Size of the fixed-width tail: latitude, longitude, timestamp
const TAIL_SIZE: usize = 4 + 4 + 8;

/// Log progress every this many records
const TRACE_INTERVAL: usize = 100_000;

/// Reads every record from `reader` until a clean end of input.
///
/// # Errors
/// - [`Error::TruncatedRecord`] if input ends inside a record
/// - [`Error::InvalidRegistration`] if a label is not UTF-8 or exceeds
///   [`MAX_REGISTRATION_LEN`]
/// - [`Error::NonFiniteCoordinate`] if a coordinate is NaN or infinite
/// - [`Error::Io`] on any other read failure
pub fn read_vehicles<R: Read>(reader: R) -> Result<Vec<Vehicle>> {
    let mut reader = BufReader::new(reader);
    let mut vehicles = Vec::new();

    while let Some(vehicle) = read_record(&mut reader, vehicles.len())? {
        vehicles.push(vehicle);
        if vehicles.len() % TRACE_INTERVAL == 0 {
            trace!(records = vehicles.len(), "reading vehicle records");
        }
    }
    Ok(vehicles)
}

/// Writes `vehicles` in record format.
///
/// # Errors
/// - [`Error::InvalidRegistration`] if a label contains NUL or exceeds
///   [`MAX_REGISTRATION_LEN`]
/// - [`Error::NonFiniteCoordinate`] if a coordinate overflows single precision
/// - [`Error::Io`] on write failure
pub fn write_vehicles<W: Write>(writer: W, vehicles: &[Vehicle]) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for (index, vehicle) in vehicles.iter().enumerate() {
        let label = vehicle.registration().as_bytes();
        if label.len() > MAX_REGISTRATION_LEN || label.contains(&0) {
            return Err(Error::InvalidRegistration { index });
        }

        let position = vehicle.position();
        let latitude = narrow(position.latitude());
        let longitude = narrow(position.longitude());
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                latitude: position.latitude(),
                longitude: position.longitude(),
            });
        }

        writer.write_all(&vehicle.id().to_le_bytes())?;
        writer.write_all(label)?;
        writer.write_all(&[0])?;
        writer.write_all(&latitude.to_le_bytes())?;
        writer.write_all(&longitude.to_le_bytes())?;
        writer.write_all(&vehicle.recorded_at().to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Loads all records from the file at `path`.
///
/// # Errors
/// See [`read_vehicles`]; opening the file may also fail with [`Error::Io`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Vehicle>> {
    let path = path.as_ref();
    let vehicles = read_vehicles(File::open(path)?)?;
    debug!(path = %path.display(), records = vehicles.len(), "loaded vehicle records");
    Ok(vehicles)
}

/// Saves `vehicles` to the file at `path`, replacing it.
///
/// # Errors
/// See [`write_vehicles`]; creating the file may also fail with [`Error::Io`].
pub fn save<P: AsRef<Path>>(path: P, vehicles: &[Vehicle]) -> Result<()> {
    let path = path.as_ref();
    write_vehicles(File::create(path)?, vehicles)?;
    debug!(path = %path.display(), records = vehicles.len(), "saved vehicle records");
    Ok(())
}

/// Reads one record, `None` at a clean end of input.
fn read_record<R: BufRead>(reader: &mut R, index: usize) -> Result<Option<Vehicle>> {
    let mut id = [0u8; 4];
    match fill(reader, &mut id)? {
        0 => return Ok(None),
        4 => {}
        _ => return Err(Error::TruncatedRecord { index }),
    }

    let mut label = Vec::with_capacity(16);
    let limit = (MAX_REGISTRATION_LEN + 1) as u64;
    let read = reader.by_ref().take(limit).read_until(0, &mut label)?;
    if label.last() != Some(&0) {
        return Err(if read > MAX_REGISTRATION_LEN {
            Error::InvalidRegistration { index }
        } else {
            Error::TruncatedRecord { index }
        });
    }
    label.truncate(label.len() - 1);
    let registration = String::from_utf8(label).map_err(|_| Error::InvalidRegistration { index })?;

    let mut tail = [0u8; TAIL_SIZE];
    if fill(reader, &mut tail)? != TAIL_SIZE {
        return Err(Error::TruncatedRecord { index });
    }
    let latitude = f32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);
    let longitude = f32::from_le_bytes([tail[4], tail[5], tail[6], tail[7]]);
    let mut stamp = [0u8; 8];
    stamp.copy_from_slice(&tail[8..]);

    Vehicle::with_timestamp(
        i32::from_le_bytes(id),
        registration,
        f64::from(latitude),
        f64::from(longitude),
        u64::from_le_bytes(stamp),
    )
    .map(Some)
}

/// Reads until `buf` is full or input ends; returns the number of bytes read.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[expect(clippy::cast_possible_truncation, reason = "records store single precision")]
fn narrow(value: f64) -> f32 {
    value as f32
}
