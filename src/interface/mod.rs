//! Módulo de abstracción para interfaces de comunicación con el dispositivo ICM20602

use embedded_hal::i2c::{self, ErrorKind, I2c};

use crate::device::{BusFault, Icm20602Error};
use crate::register::{I2C_ADDRESS, I2C_ADDRESS_AD0_LOW};

#[cfg(test)]
pub mod mock;

/// Máximo de bytes de datos por escritura
pub const MAX_WRITE_LEN: usize = 16;

/// Error genérico para interfaces de comunicación
#[derive(Debug, Clone)]
pub enum InterfaceError<E> {
    /// Error de comunicación I2C
    I2cError(E),
    /// Parámetro inválido
    InvalidParameter,
}

/// Trait para abstraer la comunicación con el dispositivo ICM20602
pub trait Interface {
    /// Tipo de error que puede producir la interfaz
    type Error;

    /// Escribe `data` a partir del registro `reg`
    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Lee `data.len()` bytes a partir del registro `reg`
    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_reg(reg, data)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_reg(reg, data)
    }
}

/// Implementación de Interface para I2C
pub struct I2cInterface<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Crea una nueva interfaz I2C
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Interfaz con la dirección por defecto (0x69, AD0 en alto)
    pub fn default_address(i2c: I2C) -> Self {
        Self::new(i2c, I2C_ADDRESS)
    }

    /// Interfaz con la dirección alternativa (0x68, AD0 en bajo)
    pub fn alternative_address(i2c: I2C) -> Self {
        Self::new(i2c, I2C_ADDRESS_AD0_LOW)
    }

    /// Dirección I2C en uso
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Consume la interfaz y devuelve el dispositivo I2C subyacente
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Interface for I2cInterface<I2C> {
    type Error = InterfaceError<I2C::Error>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.len() > MAX_WRITE_LEN {
            return Err(InterfaceError::InvalidParameter);
        }

        let mut buffer = [0u8; MAX_WRITE_LEN + 1];
        buffer[0] = reg;
        buffer[1..data.len() + 1].copy_from_slice(data);

        self.i2c
            .write(self.addr, &buffer[..data.len() + 1])
            .map_err(InterfaceError::I2cError)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }

        self.i2c
            .write_read(self.addr, &[reg], data)
            .map_err(InterfaceError::I2cError)
    }
}

// Clasifica los errores del bus según el ErrorKind de embedded-hal
impl<E: i2c::Error> From<InterfaceError<E>> for Icm20602Error {
    fn from(error: InterfaceError<E>) -> Self {
        match error {
            InterfaceError::I2cError(e) => match e.kind() {
                ErrorKind::NoAcknowledge(_) => Icm20602Error::Bus(BusFault::Nack),
                _ => Icm20602Error::Bus(BusFault::Transport),
            },
            InterfaceError::InvalidParameter => Icm20602Error::InvalidParameter,
        }
    }
}
