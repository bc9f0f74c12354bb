//! Funciones de conversión para datos del sensor ICM20602
//!
//! Todas las conversiones trabajan en aritmética entera: aceleración en mili-g,
//! velocidad angular en décimas de °/s y temperatura en °C enteros.

use crate::device::Icm20602Error;
use crate::types::sensitivity;

/// Combina dos bytes big-endian en una palabra con signo
#[inline]
pub fn be_i16(high: u8, low: u8) -> i16 {
    i16::from_be_bytes([high, low])
}

/// Combina dos bytes big-endian en una palabra sin signo
#[inline]
pub fn be_u16(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}

/// Convierte una cuenta raw del acelerómetro a mili-g
///
/// `(raw * 1000) >> shift`, con desplazamiento aritmético (conserva el signo).
///
/// # Errors
/// `SensitivityNotConfigured` si `shift` es 0 (rango no seleccionado) e
/// `InvalidParameter` si es 32 o más.
pub fn accel_raw_to_mg(raw: i16, shift: u8) -> Result<i16, Icm20602Error> {
    if shift == 0 {
        return Err(Icm20602Error::SensitivityNotConfigured);
    }
    let scaled = (raw as i32 * 1000)
        .checked_shr(u32::from(shift))
        .ok_or(Icm20602Error::InvalidParameter)?;
    Ok(scaled as i16)
}

/// Convierte una cuenta raw del giroscopio a décimas de °/s
///
/// `(raw * 10) / divisor`, división entera truncada hacia cero.
///
/// # Errors
/// `SensitivityNotConfigured` si `divisor` es 0 (rango no seleccionado).
pub fn gyro_raw_to_dps10(raw: i16, divisor: u16) -> Result<i16, Icm20602Error> {
    if divisor == 0 {
        return Err(Icm20602Error::SensitivityNotConfigured);
    }
    Ok(((raw as i32 * 10) / divisor as i32) as i16)
}

/// Convierte el valor raw de temperatura a grados Celsius
///
/// El resultado se estrecha a 8 bits: fuera de [-128, 127] °C se trunca.
pub fn temp_raw_to_celsius(raw: i16) -> i8 {
    ((raw as i32 * 10) / sensitivity::TEMP_SENSITIVITY + sensitivity::ROOM_TEMP_OFFSET) as i8
}

/// Decodifica tres palabras consecutivas a mili-g
pub fn accel_triple_to_mg(bytes: &[u8], shift: u8) -> Result<[i16; 3], Icm20602Error> {
    Ok([
        accel_raw_to_mg(be_i16(bytes[0], bytes[1]), shift)?,
        accel_raw_to_mg(be_i16(bytes[2], bytes[3]), shift)?,
        accel_raw_to_mg(be_i16(bytes[4], bytes[5]), shift)?,
    ])
}

/// Decodifica tres palabras consecutivas a décimas de °/s
pub fn gyro_triple_to_dps10(bytes: &[u8], divisor: u16) -> Result<[i16; 3], Icm20602Error> {
    Ok([
        gyro_raw_to_dps10(be_i16(bytes[0], bytes[1]), divisor)?,
        gyro_raw_to_dps10(be_i16(bytes[2], bytes[3]), divisor)?,
        gyro_raw_to_dps10(be_i16(bytes[4], bytes[5]), divisor)?,
    ])
}
