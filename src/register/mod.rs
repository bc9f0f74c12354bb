//! Definiciones de registros para el ICM20602
//!
//! El ICM20602 tiene un único mapa de registros (sin bancos), así que todas
//! las direcciones son absolutas.

/// Dirección I2C por defecto (pin AD0 en alto)
pub const I2C_ADDRESS: u8 = 0x69;

/// Dirección I2C alternativa (pin AD0 en bajo)
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// Valor esperado en el registro WHO_AM_I
pub const WHO_AM_I_VALUE: u8 = 0x12;

/// Mapa de registros del ICM20602
pub mod registers {
    // Offsets de temperatura del giroscopio
    pub const XG_OFFS_TC_H: u8 = 0x04;
    pub const XG_OFFS_TC_L: u8 = 0x05;
    pub const YG_OFFS_TC_H: u8 = 0x07;
    pub const YG_OFFS_TC_L: u8 = 0x08;
    pub const ZG_OFFS_TC_H: u8 = 0x0A;
    pub const ZG_OFFS_TC_L: u8 = 0x0B;

    // Self-test del acelerómetro
    pub const SELF_TEST_X_ACCEL: u8 = 0x0D;
    pub const SELF_TEST_Y_ACCEL: u8 = 0x0E;
    pub const SELF_TEST_Z_ACCEL: u8 = 0x0F;

    /// Registro no documentado. Un valor incorrecto produce un offset de
    /// ~2.7 m/s² en el eje Y del acelerómetro.
    pub const UNDOC1: u8 = 0x11;
    pub const UNDOC1_VALUE: u8 = 0xC9;

    // Offsets de usuario del giroscopio
    pub const XG_OFFS_USRH: u8 = 0x13;
    pub const XG_OFFS_USRL: u8 = 0x14;
    pub const YG_OFFS_USRH: u8 = 0x15;
    pub const YG_OFFS_USRL: u8 = 0x16;
    pub const ZG_OFFS_USRH: u8 = 0x17;
    pub const ZG_OFFS_USRL: u8 = 0x18;

    // Configuración de muestreo y filtros
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_CONFIG_2: u8 = 0x1D;
    pub const LP_MODE_CFG: u8 = 0x1E;

    // Umbrales de wake-on-motion
    pub const ACCEL_WOM_X_THR: u8 = 0x20;
    pub const ACCEL_WOM_Y_THR: u8 = 0x21;
    pub const ACCEL_WOM_Z_THR: u8 = 0x22;

    pub const FIFO_EN: u8 = 0x23;

    // Interrupciones
    pub const FSYNC_INT: u8 = 0x36;
    pub const INT_PIN_CFG: u8 = 0x37;
    pub const INT_ENABLE: u8 = 0x38;
    pub const FIFO_WM_INT_STATUS: u8 = 0x39;
    pub const INT_STATUS: u8 = 0x3A;

    // Registros de acelerómetro
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const ACCEL_XOUT_L: u8 = 0x3C;
    pub const ACCEL_YOUT_H: u8 = 0x3D;
    pub const ACCEL_YOUT_L: u8 = 0x3E;
    pub const ACCEL_ZOUT_H: u8 = 0x3F;
    pub const ACCEL_ZOUT_L: u8 = 0x40;

    // Registros de temperatura
    pub const TEMP_OUT_H: u8 = 0x41;
    pub const TEMP_OUT_L: u8 = 0x42;

    // Registros de giroscopio
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const GYRO_XOUT_L: u8 = 0x44;
    pub const GYRO_YOUT_H: u8 = 0x45;
    pub const GYRO_YOUT_L: u8 = 0x46;
    pub const GYRO_ZOUT_H: u8 = 0x47;
    pub const GYRO_ZOUT_L: u8 = 0x48;

    // Self-test del giroscopio
    pub const SELF_TEST_X_GYRO: u8 = 0x50;
    pub const SELF_TEST_Y_GYRO: u8 = 0x51;
    pub const SELF_TEST_Z_GYRO: u8 = 0x52;

    // Umbral de watermark del FIFO
    pub const FIFO_WM_TH1: u8 = 0x60;
    pub const FIFO_WM_TH2: u8 = 0x61;

    // Control y gestión de energía
    pub const SIGNAL_PATH_RESET: u8 = 0x68;
    pub const ACCEL_INTEL_CTRL: u8 = 0x69;
    pub const USER_CTRL: u8 = 0x6A;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const PWR_MGMT_2: u8 = 0x6C;
    pub const I2C_IF: u8 = 0x70;

    // Registros de FIFO
    pub const FIFO_COUNTH: u8 = 0x72;
    pub const FIFO_COUNTL: u8 = 0x73;
    pub const FIFO_R_W: u8 = 0x74;

    // Registros de identificación
    pub const WHO_AM_I: u8 = 0x75;

    // Offsets del acelerómetro
    pub const XA_OFFSET_H: u8 = 0x77;
    pub const XA_OFFSET_L: u8 = 0x78;
    pub const YA_OFFSET_H: u8 = 0x79;
    pub const YA_OFFSET_L: u8 = 0x7A;
    pub const ZA_OFFSET_H: u8 = 0x7B;
    pub const ZA_OFFSET_L: u8 = 0x7C;
}

#[cfg(test)]
mod tests {
    use super::registers::*;

    #[test]
    fn test_data_registers_are_contiguous() {
        // Las lecturas en ráfaga dependen de este orden
        assert_eq!(ACCEL_XOUT_H + 6, TEMP_OUT_H);
        assert_eq!(TEMP_OUT_H + 2, GYRO_XOUT_H);
        assert_eq!(GYRO_ZOUT_L - ACCEL_XOUT_H + 1, 14);
        assert_eq!(FIFO_COUNTH + 1, FIFO_COUNTL);
    }

    #[test]
    fn test_offset_register_pairs() {
        assert_eq!(XA_OFFSET_H + 2, YA_OFFSET_H);
        assert_eq!(YA_OFFSET_H + 2, ZA_OFFSET_H);
        assert_eq!(XG_OFFS_USRH + 2, YG_OFFS_USRH);
        assert_eq!(YG_OFFS_USRH + 2, ZG_OFFS_USRH);
    }
}
