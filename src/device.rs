use core::fmt;

use crate::controls::{AccelData, GyroData, SampleReading};
use crate::conversion::{accel_triple_to_mg, be_i16, gyro_triple_to_dps10, temp_raw_to_celsius};
use crate::interface::Interface;
use crate::register::{registers, WHO_AM_I_VALUE};
use crate::types::{bits, data_defs, set_bits, set_field, ClockSource};

// Define the device structure and enums
pub struct Icm20602<I> {
    pub(crate) interface: I,
    pub(crate) base_state: BaseState,
}

/// Tipo de fallo en el bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusFault {
    /// El dispositivo no respondió a tiempo
    Timeout,
    /// El dispositivo no reconoció la dirección o el dato
    Nack,
    /// Cualquier otro error de transporte
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icm20602Error {
    /// Fallo en una transferencia de registros
    Bus(BusFault),
    /// Parámetro fuera de rango
    InvalidParameter,
    /// Lectura decodificada antes de seleccionar el rango correspondiente
    SensitivityNotConfigured,
    /// WHO_AM_I inesperado (contiene el valor leído)
    WhoAmIError(u8),
}

impl fmt::Display for Icm20602Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icm20602Error::Bus(fault) => write!(f, "bus error: {:?}", fault),
            Icm20602Error::InvalidParameter => write!(f, "invalid parameter"),
            Icm20602Error::SensitivityNotConfigured => {
                write!(f, "sensitivity not configured, select a range first")
            }
            Icm20602Error::WhoAmIError(found) => write!(
                f,
                "unexpected WHO_AM_I 0x{:02X} (expected 0x{:02X})",
                found, WHO_AM_I_VALUE
            ),
        }
    }
}

impl std::error::Error for Icm20602Error {}

/// Estado derivado de la configuración, mantenido por los setters
///
/// Un valor 0 en cualquiera de los campos significa "sin configurar".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseState {
    /// Desplazamiento raw → mili-g, fijado por `set_accel_range`
    pub accel_sensitivity_shift: u8,
    /// Divisor raw → décimas de °/s, fijado por `set_gyro_dps`
    pub gyro_sensitivity_divisor: u16,
    /// Ancho en bytes de una fila del FIFO (0, 8 o 14)
    pub fifo_row_length: u8,
}

impl<I, E> Icm20602<I>
where
    I: Interface<Error = E>,
    Icm20602Error: From<E>,
{
    /// Create a new instance of Icm20602
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            base_state: BaseState::default(),
        }
    }

    /// Consume el driver y devuelve la interfaz
    pub fn release(self) -> I {
        self.interface
    }

    /// Estado derivado actual
    pub fn state(&self) -> &BaseState {
        &self.base_state
    }

    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Icm20602Error> {
        let mut data = [0u8];
        self.interface.read_reg(reg, &mut data)?;
        Ok(data[0])
    }

    /// Lee varios registros consecutivos en una sola transferencia
    pub fn read_regs(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Icm20602Error> {
        self.interface.read_reg(reg, data)?;
        Ok(())
    }

    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Icm20602Error> {
        self.interface.write_reg(reg, &[value])?;
        Ok(())
    }

    /// Escribe varios registros consecutivos en una sola transferencia
    pub fn write_regs(&mut self, reg: u8, values: &[u8]) -> Result<(), Icm20602Error> {
        self.interface.write_reg(reg, values)?;
        Ok(())
    }

    /// Lee el registro, aplica `f` y escribe el resultado
    pub fn modify_reg<F>(&mut self, reg: u8, f: F) -> Result<(), Icm20602Error>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_reg(reg)?;
        let new_value = f(value);
        log::trace!("reg 0x{:02X}: 0x{:02X} -> 0x{:02X}", reg, value, new_value);
        self.write_reg(reg, new_value)
    }

    /// Reset completo del dispositivo
    ///
    /// El estado derivado (`BaseState`) no se borra: hay que volver a
    /// configurar rangos y ejes después del reset.
    pub fn reset(&mut self) -> Result<(), Icm20602Error> {
        log::debug!("device reset");
        self.write_reg(registers::PWR_MGMT_1, bits::DEVICE_RESET | bits::TEMP_DIS)
    }

    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Icm20602Error> {
        self.set_clock_source_raw(source as u8)
    }

    /// Escribe el campo CLKSEL (0-7) sin tocar el resto de PWR_MGMT_1
    pub fn set_clock_source_raw(&mut self, source: u8) -> Result<(), Icm20602Error> {
        if source > 7 {
            return Err(Icm20602Error::InvalidParameter);
        }
        self.modify_reg(registers::PWR_MGMT_1, |val| {
            set_field(val, bits::CLKSEL, source)
        })
    }

    /// Configura la tasa de muestreo en Hz
    ///
    /// La entrada se limita a [4, 1000] y se escribe el divisor
    /// `1000 / hz - 1`. Devuelve el divisor escrito.
    pub fn set_sample_rate(&mut self, hz: u16) -> Result<u8, Icm20602Error> {
        let divider = sample_rate_divider(hz);
        log::debug!("sample rate {} Hz -> SMPLRT_DIV {}", hz, divider);
        self.write_reg(registers::SMPLRT_DIV, divider)?;
        Ok(divider)
    }

    pub fn set_sleep(&mut self, enable: bool) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::PWR_MGMT_1, |val| set_bits(val, bits::SLEEP, enable))
    }

    /// Activa o desactiva el sensor de temperatura (TEMP_DIS en PWR_MGMT_1)
    pub fn set_temperature_enable(&mut self, enable: bool) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::PWR_MGMT_1, |val| set_bits(val, bits::TEMP_DIS, !enable))
    }

    pub fn who_am_i(&mut self) -> Result<u8, Icm20602Error> {
        self.read_reg(registers::WHO_AM_I)
    }

    /// Comprueba que el dispositivo conectado es un ICM20602
    pub fn verify_device(&mut self) -> Result<(), Icm20602Error> {
        let id = self.who_am_i()?;
        if id != WHO_AM_I_VALUE {
            log::warn!("WHO_AM_I mismatch: 0x{:02X}", id);
            return Err(Icm20602Error::WhoAmIError(id));
        }
        Ok(())
    }

    /// Lee acelerómetro (mili-g) y temperatura (°C) en una ráfaga de 8 bytes
    pub fn read_accel_with_temperature(&mut self) -> Result<SampleReading, Icm20602Error> {
        let mut buffer = [0u8; 8];
        self.read_regs(registers::ACCEL_XOUT_H, &mut buffer)?;

        let accel = accel_triple_to_mg(&buffer[0..6], self.base_state.accel_sensitivity_shift)?;
        Ok(SampleReading {
            accel: Some(AccelData::from(accel)),
            gyro: None,
            temperature_c: temp_raw_to_celsius(be_i16(buffer[6], buffer[7])),
        })
    }

    /// Lee el giroscopio (décimas de °/s) en una ráfaga de 6 bytes
    pub fn read_gyro(&mut self) -> Result<GyroData, Icm20602Error> {
        let mut buffer = [0u8; 6];
        self.read_regs(registers::GYRO_XOUT_H, &mut buffer)?;

        let gyro = gyro_triple_to_dps10(&buffer, self.base_state.gyro_sensitivity_divisor)?;
        Ok(GyroData::from(gyro))
    }

    /// Lee acelerómetro, temperatura y giroscopio en una ráfaga de 14 bytes
    pub fn read_accel_and_gyro(&mut self) -> Result<SampleReading, Icm20602Error> {
        let mut buffer = [0u8; 14];
        self.read_regs(registers::ACCEL_XOUT_H, &mut buffer)?;

        let accel = accel_triple_to_mg(&buffer[0..6], self.base_state.accel_sensitivity_shift)?;
        let gyro =
            gyro_triple_to_dps10(&buffer[8..14], self.base_state.gyro_sensitivity_divisor)?;
        Ok(SampleReading {
            accel: Some(AccelData::from(accel)),
            gyro: Some(GyroData::from(gyro)),
            temperature_c: temp_raw_to_celsius(be_i16(buffer[6], buffer[7])),
        })
    }

    /// Lee sólo la temperatura en °C
    pub fn read_temperature(&mut self) -> Result<i8, Icm20602Error> {
        let mut buffer = [0u8; 2];
        self.read_regs(registers::TEMP_OUT_H, &mut buffer)?;
        Ok(temp_raw_to_celsius(be_i16(buffer[0], buffer[1])))
    }

    // Cada activación de ejes (acelerómetro o giroscopio) avanza el ancho de
    // fila: la primera deja 8 bytes y cualquier otra posterior 14.
    pub(crate) fn note_axis_activation(&mut self) {
        self.base_state.fifo_row_length = if self.base_state.fifo_row_length == 0 {
            data_defs::FIFO_ROW_SINGLE
        } else {
            data_defs::FIFO_ROW_BOTH
        };
        log::debug!("FIFO row length -> {}", self.base_state.fifo_row_length);
    }
}

/// Divisor de SMPLRT_DIV para una tasa en Hz, limitada a [4, 1000]
pub fn sample_rate_divider(hz: u16) -> u8 {
    let hz = hz.clamp(data_defs::MIN_SAMPLE_RATE_HZ, data_defs::MAX_SAMPLE_RATE_HZ);
    (data_defs::MAX_SAMPLE_RATE_HZ / hz - 1) as u8
}
