//! Configuración agrupada del ICM20602

use crate::device::{Icm20602, Icm20602Error};
use crate::interface::Interface;
use crate::types::{AccelFullScale, AccelLpfSetting, ClockSource, GyroFullScale, GyroLpfSetting};

/// Ejes activos de un sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisEnable {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisEnable {
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };

    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// Configuración completa aplicada por [`Icm20602::configure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorConfig {
    pub clock_source: ClockSource,
    /// Sensor de temperatura activo
    pub temperature: bool,
    /// Tasa de muestreo en Hz (se limita a [4, 1000])
    pub sample_rate_hz: u16,
    pub accel_range: AccelFullScale,
    pub accel_lpf: AccelLpfSetting,
    pub gyro_range: GyroFullScale,
    pub gyro_lpf: GyroLpfSetting,
    pub accel_axes: AxisEnable,
    pub gyro_axes: AxisEnable,
    /// Escribir acelerómetro en el FIFO
    pub fifo_accel: bool,
    /// Escribir giroscopio en el FIFO
    pub fifo_gyro: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::Auto,
            temperature: true,
            sample_rate_hz: 100,
            accel_range: AccelFullScale::Fs2G,
            accel_lpf: AccelLpfSetting::Lp218Hz,
            gyro_range: GyroFullScale::Fs250Dps,
            gyro_lpf: GyroLpfSetting::Lp176Hz,
            accel_axes: AxisEnable::ALL,
            gyro_axes: AxisEnable::ALL,
            fifo_accel: false,
            fifo_gyro: false,
        }
    }
}

impl<I, E> Icm20602<I>
where
    I: Interface<Error = E>,
    Icm20602Error: From<E>,
{
    /// Aplica `config` en orden: reloj, tasa, acelerómetro, giroscopio, ejes y FIFO
    ///
    /// También saca al sensor del modo sleep en el que queda tras un reset.
    ///
    /// El ancho de fila del FIFO depende del estado previo: llamar a
    /// `configure` sobre un driver recién creado con ambos sensores activos
    /// lo deja en 14 bytes.
    pub fn configure(&mut self, config: &SensorConfig) -> Result<(), Icm20602Error> {
        self.set_clock_source(config.clock_source)?;
        self.set_sleep(false)?;
        self.set_temperature_enable(config.temperature)?;
        self.set_sample_rate(config.sample_rate_hz)?;
        self.set_accel_range(config.accel_range)?;
        self.set_accel_lpf(config.accel_lpf)?;
        self.set_gyro_dps(config.gyro_range)?;
        self.set_gyro_lpf(config.gyro_lpf)?;

        let accel = config.accel_axes;
        self.set_accel_axis_enable(accel.x, accel.y, accel.z)?;
        let gyro = config.gyro_axes;
        self.set_gyro_axis_enable(gyro.x, gyro.y, gyro.z)?;

        if (config.fifo_accel && !accel.any()) || (config.fifo_gyro && !gyro.any()) {
            log::warn!("FIFO enabled for a sensor with every axis in standby");
        }
        self.set_fifo_enable(config.fifo_accel, config.fifo_gyro)?;
        log::debug!("configuration applied: {:?}", config);
        Ok(())
    }
}
