//! Biblioteca Rust para el sensor de movimiento InvenSense ICM20602
//!
//! Esta biblioteca proporciona una interfaz para controlar el sensor ICM20602,
//! un IMU de 6 ejes con acelerómetro y giroscopio. Las lecturas se entregan
//! en unidades enteras: mili-g, décimas de °/s y °C.

use embedded_hal::i2c::I2c;

pub mod config;
pub mod controls;
pub mod conversion;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod register;
pub mod types;

// Re-exports públicos
pub use config::{AxisEnable, SensorConfig};
pub use controls::{AccelData, GyroData, OffsetTriple, SampleReading};
pub use conversion::{accel_raw_to_mg, gyro_raw_to_dps10, temp_raw_to_celsius};
pub use device::{BaseState, BusFault, Icm20602, Icm20602Error};
pub use fifo::InterruptStatus;
pub use interface::{I2cInterface, Interface, InterfaceError};
pub use types::{AccelFullScale, AccelLpfSetting, ClockSource, GyroFullScale, GyroLpfSetting};

/// Crea un nuevo dispositivo ICM20602 usando el bus I2C
pub fn new_i2c_device<I: I2c>(i2c: I, address: u8) -> Icm20602<I2cInterface<I>> {
    Icm20602::new(I2cInterface::new(i2c, address))
}
