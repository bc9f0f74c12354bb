//! Definiciones de tipos y constantes comunes para el ICM20602

/// Escalas completas disponibles para el giroscopio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GyroFullScale {
    /// ±250 dps
    Fs250Dps = 0,
    /// ±500 dps
    Fs500Dps = 1,
    /// ±1000 dps
    Fs1000Dps = 2,
    /// ±2000 dps
    Fs2000Dps = 3,
}

impl Default for GyroFullScale {
    fn default() -> Self {
        GyroFullScale::Fs250Dps
    }
}

impl From<u8> for GyroFullScale {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => GyroFullScale::Fs250Dps,
            1 => GyroFullScale::Fs500Dps,
            2 => GyroFullScale::Fs1000Dps,
            _ => GyroFullScale::Fs2000Dps,
        }
    }
}

impl GyroFullScale {
    /// Divisor que convierte cuentas raw a décimas de °/s
    pub fn sensitivity_divisor(self) -> u16 {
        match self {
            GyroFullScale::Fs250Dps => sensitivity::GYRO_250_DPS,
            GyroFullScale::Fs500Dps => sensitivity::GYRO_500_DPS,
            GyroFullScale::Fs1000Dps => sensitivity::GYRO_1000_DPS,
            GyroFullScale::Fs2000Dps => sensitivity::GYRO_2000_DPS,
        }
    }
}

/// Escalas completas disponibles para el acelerómetro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccelFullScale {
    /// ±2g
    Fs2G = 0,
    /// ±4g
    Fs4G = 1,
    /// ±8g
    Fs8G = 2,
    /// ±16g
    Fs16G = 3,
}

impl Default for AccelFullScale {
    fn default() -> Self {
        AccelFullScale::Fs2G
    }
}

impl From<u8> for AccelFullScale {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => AccelFullScale::Fs2G,
            1 => AccelFullScale::Fs4G,
            2 => AccelFullScale::Fs8G,
            _ => AccelFullScale::Fs16G,
        }
    }
}

impl AccelFullScale {
    /// Desplazamiento a la derecha que convierte cuentas raw a mili-g
    pub fn sensitivity_shift(self) -> u8 {
        match self {
            AccelFullScale::Fs2G => sensitivity::ACCEL_SHIFT_2G,
            AccelFullScale::Fs4G => sensitivity::ACCEL_SHIFT_4G,
            AccelFullScale::Fs8G => sensitivity::ACCEL_SHIFT_8G,
            AccelFullScale::Fs16G => sensitivity::ACCEL_SHIFT_16G,
        }
    }
}

/// Configuración del filtro paso bajo del acelerómetro (ACCEL_CONFIG_2)
///
/// El valor numérico es el que se escribe en A_DLPF_CFG, salvo para el modo
/// bypass, que sólo activa ACCEL_FCHOICE_B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccelLpfSetting {
    /// 218 Hz, salida a 1 kHz
    Lp218Hz = 0,
    /// 99 Hz, salida a 1 kHz
    Lp99Hz = 2,
    /// 44.8 Hz, salida a 1 kHz
    Lp44Hz = 3,
    /// 21.2 Hz, salida a 1 kHz
    Lp21Hz = 4,
    /// 10.2 Hz, salida a 1 kHz
    Lp10Hz = 5,
    /// 5.1 Hz, salida a 1 kHz
    Lp5Hz = 6,
    /// 420 Hz, salida a 1 kHz
    Lp420Hz = 7,
    /// Bypass, 1046 Hz, salida a 4 kHz
    Bypass1046Hz = 8,
}

/// Configuración del filtro paso bajo del giroscopio (CONFIG + GYRO_CONFIG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GyroLpfSetting {
    /// 250 Hz, salida a 8 kHz
    Lp250Hz = 0,
    /// 176 Hz, salida a 1 kHz
    Lp176Hz = 1,
    /// 92 Hz, salida a 1 kHz
    Lp92Hz = 2,
    /// 41 Hz, salida a 1 kHz
    Lp41Hz = 3,
    /// 20 Hz, salida a 1 kHz
    Lp20Hz = 4,
    /// 10 Hz, salida a 1 kHz
    Lp10Hz = 5,
    /// 5 Hz, salida a 1 kHz
    Lp5Hz = 6,
    /// 3281 Hz, salida a 8 kHz
    Lp3281Hz = 7,
    /// Bypass, 3281 Hz, salida a 32 kHz
    Bypass3281Hz = 8,
    /// Bypass, 8173 Hz, salida a 32 kHz
    Bypass8173Hz = 9,
}

impl GyroLpfSetting {
    /// Valor de FCHOICE_B para este modo
    pub fn fchoice_b(self) -> u8 {
        match self {
            GyroLpfSetting::Bypass3281Hz => 2,
            GyroLpfSetting::Bypass8173Hz => 1,
            _ => 0,
        }
    }

    /// Valor de DLPF_CFG para este modo (0 en los modos bypass)
    pub fn dlpf_cfg(self) -> u8 {
        match self {
            GyroLpfSetting::Bypass3281Hz | GyroLpfSetting::Bypass8173Hz => 0,
            other => other as u8,
        }
    }
}

/// Fuente de reloj (campo CLKSEL de PWR_MGMT_1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockSource {
    /// Oscilador interno de 20 MHz
    Internal20MHz = 0,
    /// Selección automática (PLL si está listo, si no el oscilador interno)
    Auto = 1,
    /// Detiene el reloj y mantiene el generador de tiempos en reset
    Stop = 7,
}

impl Default for ClockSource {
    fn default() -> Self {
        ClockSource::Auto
    }
}

/// Sensibilidades usadas en la decodificación
pub mod sensitivity {
    pub const ACCEL_SHIFT_2G: u8 = 14;
    pub const ACCEL_SHIFT_4G: u8 = 13;
    pub const ACCEL_SHIFT_8G: u8 = 12;
    pub const ACCEL_SHIFT_16G: u8 = 11;

    pub const GYRO_250_DPS: u16 = 1310;
    pub const GYRO_500_DPS: u16 = 655;
    pub const GYRO_1000_DPS: u16 = 328;
    pub const GYRO_2000_DPS: u16 = 164;

    pub const TEMP_SENSITIVITY: i32 = 3268;
    pub const ROOM_TEMP_OFFSET: i32 = 25;
}

/// Bits útiles para configuración y control
pub mod bits {
    // PWR_MGMT_1
    pub const DEVICE_RESET: u8 = 0x80;
    pub const SLEEP: u8 = 0x40;
    pub const CYCLE: u8 = 0x20;
    pub const GYRO_STANDBY: u8 = 0x10;
    pub const TEMP_DIS: u8 = 0x08;
    pub const CLKSEL: u8 = 0x07; // bits [2:0]

    // PWR_MGMT_2
    pub const STBY_XA: u8 = 0x20;
    pub const STBY_YA: u8 = 0x10;
    pub const STBY_ZA: u8 = 0x08;
    pub const STBY_XG: u8 = 0x04;
    pub const STBY_YG: u8 = 0x02;
    pub const STBY_ZG: u8 = 0x01;

    // CONFIG
    pub const DLPF_CFG: u8 = 0x07; // bits [2:0]

    // GYRO_CONFIG
    pub const GYRO_FS_SEL: u8 = 0x18; // bits [4:3]
    pub const FCHOICE_B: u8 = 0x03; // bits [1:0]

    // ACCEL_CONFIG
    pub const ACCEL_FS_SEL: u8 = 0x18; // bits [4:3]

    // ACCEL_CONFIG_2
    pub const ACCEL_FCHOICE_B: u8 = 0x08;
    pub const A_DLPF_CFG: u8 = 0x07; // bits [2:0]

    // FIFO_EN
    pub const GYRO_FIFO_EN: u8 = 0x10;
    pub const ACCEL_FIFO_EN: u8 = 0x08;

    // INT_PIN_CFG
    pub const INT_LEVEL: u8 = 0x80;
    pub const INT_OPEN: u8 = 0x40;
    pub const LATCH_INT_EN: u8 = 0x20;
    pub const INT_RD_CLEAR: u8 = 0x10;

    // INT_ENABLE / INT_STATUS
    pub const WOM_X_INT: u8 = 0x80;
    pub const WOM_Y_INT: u8 = 0x40;
    pub const WOM_Z_INT: u8 = 0x20;
    pub const FIFO_OFLOW_INT: u8 = 0x10;
    pub const GDRIVE_INT: u8 = 0x04;
    pub const DATA_RDY_INT: u8 = 0x01;

    // FIFO_WM_INT_STATUS
    pub const FIFO_WM_INT: u8 = 0x40;

    // ACCEL_INTEL_CTRL
    pub const ACCEL_INTEL_EN: u8 = 0x80;
    pub const ACCEL_INTEL_MODE: u8 = 0x40;

    // USER_CTRL
    pub const FIFO_EN: u8 = 0x40;
    pub const FIFO_RST: u8 = 0x04;
    pub const SIG_COND_RST: u8 = 0x01;
}

/// Definiciones del FIFO
pub mod data_defs {
    /// Acelerómetro o giroscopio (6 bytes) más temperatura (2 bytes)
    pub const FIFO_ROW_SINGLE: u8 = 8;
    /// Acelerómetro, temperatura y giroscopio
    pub const FIFO_ROW_BOTH: u8 = 14;
    pub const MAX_WATERMARK_ROWS_SINGLE: u16 = 126;
    pub const MAX_WATERMARK_ROWS_BOTH: u16 = 72;

    pub const MIN_SAMPLE_RATE_HZ: u16 = 4;
    pub const MAX_SAMPLE_RATE_HZ: u16 = 1000;
}

/// Extrae el campo `mask` de `value`, alineado al bit 0
#[inline]
pub fn get_field(value: u8, mask: u8) -> u8 {
    (value & mask) >> mask.trailing_zeros()
}

/// Sustituye el campo `mask` de `value` por `field`
#[inline]
pub fn set_field(value: u8, mask: u8, field: u8) -> u8 {
    (value & !mask) | ((field << mask.trailing_zeros()) & mask)
}

/// Activa o desactiva los bits de `mask`
#[inline]
pub fn set_bits(value: u8, mask: u8, on: bool) -> u8 {
    if on {
        value | mask
    } else {
        value & !mask
    }
}
