//! Controles del acelerómetro y del giroscopio para el ICM20602

use crate::conversion::be_u16;
use crate::device::{Icm20602, Icm20602Error};
use crate::interface::Interface;
use crate::register::registers;
use crate::types::{
    bits, get_field, set_bits, set_field, AccelFullScale, AccelLpfSetting, GyroFullScale, GyroLpfSetting,
};

/// Aceleración en mili-g
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelData {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl From<[i16; 3]> for AccelData {
    fn from(v: [i16; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

/// Velocidad angular en décimas de °/s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GyroData {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl From<[i16; 3]> for GyroData {
    fn from(v: [i16; 3]) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

/// Resultado de una lectura en ráfaga
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReading {
    pub accel: Option<AccelData>,
    pub gyro: Option<GyroData>,
    /// Temperatura en °C (estrechada a 8 bits)
    pub temperature_c: i8,
}

/// Offsets raw por eje, tal cual están en los registros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetTriple {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl<I, E> Icm20602<I>
where
    I: Interface<Error = E>,
    Icm20602Error: From<E>,
{
    /// Configura el rango del acelerómetro y actualiza la sensibilidad en caché
    pub fn set_accel_range(&mut self, range: AccelFullScale) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::ACCEL_CONFIG, |val| {
            set_field(val, bits::ACCEL_FS_SEL, range as u8)
        })?;
        self.base_state.accel_sensitivity_shift = range.sensitivity_shift();
        log::debug!(
            "accel range {:?}, shift {}",
            range,
            self.base_state.accel_sensitivity_shift
        );
        Ok(())
    }

    /// Configura el filtro paso bajo del acelerómetro
    ///
    /// El modo bypass sólo activa ACCEL_FCHOICE_B y deja A_DLPF_CFG como estaba.
    pub fn set_accel_lpf(&mut self, setting: AccelLpfSetting) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::ACCEL_CONFIG_2, |val| match setting {
            AccelLpfSetting::Bypass1046Hz => val | bits::ACCEL_FCHOICE_B,
            other => set_field(val, bits::A_DLPF_CFG, other as u8) & !bits::ACCEL_FCHOICE_B,
        })
    }

    /// Activa o desactiva los ejes del acelerómetro
    ///
    /// Nota: `x` controla STBY_ZA y `z` controla STBY_XA.
    pub fn set_accel_axis_enable(&mut self, x: bool, y: bool, z: bool) -> Result<(), Icm20602Error> {
        let mut pwr_mgmt_2 = self.read_reg(registers::PWR_MGMT_2)?;
        pwr_mgmt_2 = set_bits(pwr_mgmt_2, bits::STBY_ZA, !x);
        pwr_mgmt_2 = set_bits(pwr_mgmt_2, bits::STBY_YA, !y);
        pwr_mgmt_2 = set_bits(pwr_mgmt_2, bits::STBY_XA, !z);

        self.write_reg(registers::PWR_MGMT_2, pwr_mgmt_2)?;
        if x || y || z {
            self.note_axis_activation();
        }
        Ok(())
    }

    /// Activa o desactiva los ejes del giroscopio
    pub fn set_gyro_axis_enable(&mut self, x: bool, y: bool, z: bool) -> Result<(), Icm20602Error> {
        let mut pwr_mgmt_2 = self.read_reg(registers::PWR_MGMT_2)?;
        pwr_mgmt_2 = set_bits(pwr_mgmt_2, bits::STBY_XG, !x);
        pwr_mgmt_2 = set_bits(pwr_mgmt_2, bits::STBY_YG, !y);
        pwr_mgmt_2 = set_bits(pwr_mgmt_2, bits::STBY_ZG, !z);

        self.write_reg(registers::PWR_MGMT_2, pwr_mgmt_2)?;
        if x || y || z {
            self.note_axis_activation();
        }
        Ok(())
    }

    /// Configura el filtro paso bajo del giroscopio (CONFIG y GYRO_CONFIG)
    pub fn set_gyro_lpf(&mut self, setting: GyroLpfSetting) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::CONFIG, |val| {
            set_field(val, bits::DLPF_CFG, setting.dlpf_cfg())
        })?;
        self.modify_reg(registers::GYRO_CONFIG, |val| {
            set_field(val, bits::FCHOICE_B, setting.fchoice_b())
        })
    }

    /// Configura el rango del giroscopio y actualiza la sensibilidad en caché
    pub fn set_gyro_dps(&mut self, range: GyroFullScale) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::GYRO_CONFIG, |val| {
            set_field(val, bits::GYRO_FS_SEL, range as u8)
        })?;
        self.base_state.gyro_sensitivity_divisor = range.sensitivity_divisor();
        log::debug!(
            "gyro range {:?}, divisor {}",
            range,
            self.base_state.gyro_sensitivity_divisor
        );
        Ok(())
    }

    /// Rango del acelerómetro leído de ACCEL_CONFIG
    pub fn accel_range(&mut self) -> Result<AccelFullScale, Icm20602Error> {
        let val = self.read_reg(registers::ACCEL_CONFIG)?;
        Ok(AccelFullScale::from(get_field(val, bits::ACCEL_FS_SEL)))
    }

    /// Rango del giroscopio leído de GYRO_CONFIG
    pub fn gyro_range(&mut self) -> Result<GyroFullScale, Icm20602Error> {
        let val = self.read_reg(registers::GYRO_CONFIG)?;
        Ok(GyroFullScale::from(get_field(val, bits::GYRO_FS_SEL)))
    }

    /// Umbrales de wake-on-motion por eje (0 desactiva el eje)
    ///
    /// Si algún eje queda activo se habilita ACCEL_INTEL_EN. Este método
    /// nunca lo desactiva, ni siquiera con los tres umbrales a 0.
    pub fn set_accel_wom_thresholds(&mut self, x: u8, y: u8, z: u8) -> Result<(), Icm20602Error> {
        let mut int_enable = self.read_reg(registers::INT_ENABLE)?;

        let axes = [
            (x, registers::ACCEL_WOM_X_THR, bits::WOM_X_INT),
            (y, registers::ACCEL_WOM_Y_THR, bits::WOM_Y_INT),
            (z, registers::ACCEL_WOM_Z_THR, bits::WOM_Z_INT),
        ];
        for (threshold, reg, enable_bit) in axes {
            if threshold != 0 {
                self.write_reg(reg, threshold)?;
            }
            int_enable = set_bits(int_enable, enable_bit, threshold != 0);
        }
        self.write_reg(registers::INT_ENABLE, int_enable)?;

        if x != 0 || y != 0 || z != 0 {
            self.modify_reg(registers::ACCEL_INTEL_CTRL, |val| val | bits::ACCEL_INTEL_EN)?;
        }
        Ok(())
    }

    pub fn set_accel_offset(&mut self, offset: OffsetTriple) -> Result<(), Icm20602Error> {
        self.write_offsets(
            [
                registers::XA_OFFSET_H,
                registers::YA_OFFSET_H,
                registers::ZA_OFFSET_H,
            ],
            offset,
        )
    }

    pub fn get_accel_offset(&mut self) -> Result<OffsetTriple, Icm20602Error> {
        self.read_offsets(registers::XA_OFFSET_H)
    }

    pub fn set_gyro_offset(&mut self, offset: OffsetTriple) -> Result<(), Icm20602Error> {
        self.write_offsets(
            [
                registers::XG_OFFS_USRH,
                registers::YG_OFFS_USRH,
                registers::ZG_OFFS_USRH,
            ],
            offset,
        )
    }

    pub fn get_gyro_offset(&mut self) -> Result<OffsetTriple, Icm20602Error> {
        self.read_offsets(registers::XG_OFFS_USRH)
    }

    fn write_offsets(&mut self, regs: [u8; 3], offset: OffsetTriple) -> Result<(), Icm20602Error> {
        for (reg, value) in regs.into_iter().zip([offset.x, offset.y, offset.z]) {
            self.write_regs(reg, &value.to_be_bytes())?;
        }
        Ok(())
    }

    fn read_offsets(&mut self, first_reg: u8) -> Result<OffsetTriple, Icm20602Error> {
        let mut buffer = [0u8; 6];
        self.read_regs(first_reg, &mut buffer)?;
        Ok(OffsetTriple {
            x: be_u16(buffer[0], buffer[1]),
            y: be_u16(buffer[2], buffer[3]),
            z: be_u16(buffer[4], buffer[5]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::BusFault;
    use crate::interface::mock::MockInterface;

    fn device() -> Icm20602<MockInterface> {
        Icm20602::new(MockInterface::new())
    }

    #[test]
    fn test_accel_range_updates_shift_and_field() {
        let cases = [
            (AccelFullScale::Fs2G, 14, 0x00),
            (AccelFullScale::Fs4G, 13, 0x08),
            (AccelFullScale::Fs8G, 12, 0x10),
            (AccelFullScale::Fs16G, 11, 0x18),
        ];
        for (range, shift, field) in cases {
            let mut dev = device();
            dev.interface.set(registers::ACCEL_CONFIG, 0xE7);
            dev.set_accel_range(range).unwrap();
            assert_eq!(dev.state().accel_sensitivity_shift, shift);
            assert_eq!(dev.interface.get(registers::ACCEL_CONFIG), 0xE7 | field);
        }
    }

    #[test]
    fn test_accel_range_decode_one_g() {
        let mut dev = device();
        dev.set_accel_range(AccelFullScale::Fs2G).unwrap();
        dev.interface.set_word(registers::ACCEL_XOUT_H, 16384);
        let reading = dev.read_accel_with_temperature().unwrap();
        assert_eq!(reading.accel.unwrap().x, 1000);
    }

    #[test]
    fn test_gyro_dps_updates_divisor_and_field() {
        let cases = [
            (GyroFullScale::Fs250Dps, 1310, 0x00),
            (GyroFullScale::Fs500Dps, 655, 0x08),
            (GyroFullScale::Fs1000Dps, 328, 0x10),
            (GyroFullScale::Fs2000Dps, 164, 0x18),
        ];
        for (range, divisor, field) in cases {
            let mut dev = device();
            dev.interface.set(registers::GYRO_CONFIG, 0x03);
            dev.set_gyro_dps(range).unwrap();
            assert_eq!(dev.state().gyro_sensitivity_divisor, divisor);
            assert_eq!(dev.interface.get(registers::GYRO_CONFIG), 0x03 | field);
        }
    }

    #[test]
    fn test_gyro_dps_decode() {
        let mut dev = device();
        dev.set_gyro_dps(GyroFullScale::Fs250Dps).unwrap();
        dev.interface.set_word(registers::GYRO_XOUT_H, 1310);
        assert_eq!(dev.read_gyro().unwrap().x, 10);
    }

    #[test]
    fn test_accel_lpf_bypass_keeps_dlpf_field() {
        let mut dev = device();
        dev.interface.set(registers::ACCEL_CONFIG_2, 0x35);
        dev.set_accel_lpf(AccelLpfSetting::Bypass1046Hz).unwrap();
        assert_eq!(dev.interface.get(registers::ACCEL_CONFIG_2), 0x3D);

        dev.set_accel_lpf(AccelLpfSetting::Lp99Hz).unwrap();
        assert_eq!(dev.interface.get(registers::ACCEL_CONFIG_2), 0x32);

        dev.set_accel_lpf(AccelLpfSetting::Lp420Hz).unwrap();
        assert_eq!(dev.interface.get(registers::ACCEL_CONFIG_2), 0x37);
    }

    #[test]
    fn test_gyro_lpf_modes() {
        let mut dev = device();
        dev.interface.set(registers::CONFIG, 0x40);
        dev.interface.set(registers::GYRO_CONFIG, 0x18);

        dev.set_gyro_lpf(GyroLpfSetting::Lp41Hz).unwrap();
        assert_eq!(dev.interface.get(registers::CONFIG), 0x43);
        assert_eq!(dev.interface.get(registers::GYRO_CONFIG), 0x18);

        dev.set_gyro_lpf(GyroLpfSetting::Bypass3281Hz).unwrap();
        assert_eq!(dev.interface.get(registers::CONFIG), 0x40);
        assert_eq!(dev.interface.get(registers::GYRO_CONFIG), 0x1A);

        dev.set_gyro_lpf(GyroLpfSetting::Bypass8173Hz).unwrap();
        assert_eq!(dev.interface.get(registers::CONFIG), 0x40);
        assert_eq!(dev.interface.get(registers::GYRO_CONFIG), 0x19);
    }

    #[test]
    fn test_accel_axis_wiring_is_swapped() {
        let mut dev = device();
        // Sólo x activo: STBY_ZA libre, STBY_YA y STBY_XA en standby
        dev.set_accel_axis_enable(true, false, false).unwrap();
        assert_eq!(
            dev.interface.get(registers::PWR_MGMT_2),
            bits::STBY_YA | bits::STBY_XA
        );

        dev.set_accel_axis_enable(false, false, true).unwrap();
        assert_eq!(
            dev.interface.get(registers::PWR_MGMT_2),
            bits::STBY_ZA | bits::STBY_YA
        );
    }

    #[test]
    fn test_gyro_axis_wiring() {
        let mut dev = device();
        dev.interface.set(registers::PWR_MGMT_2, bits::STBY_XA);
        dev.set_gyro_axis_enable(true, false, true).unwrap();
        assert_eq!(
            dev.interface.get(registers::PWR_MGMT_2),
            bits::STBY_XA | bits::STBY_YG
        );
    }

    #[test]
    fn test_fifo_row_length_toggle_sequence() {
        let mut dev = device();
        assert_eq!(dev.state().fifo_row_length, 0);

        // Desactivar todo no cuenta como activación
        dev.set_accel_axis_enable(false, false, false).unwrap();
        assert_eq!(dev.state().fifo_row_length, 0);

        dev.set_accel_axis_enable(true, true, true).unwrap();
        assert_eq!(dev.state().fifo_row_length, 8);

        dev.set_gyro_axis_enable(true, false, false).unwrap();
        assert_eq!(dev.state().fifo_row_length, 14);

        // Repetir la misma activación del acelerómetro también lleva a 14
        let mut dev = device();
        dev.set_accel_axis_enable(true, false, false).unwrap();
        dev.set_accel_axis_enable(true, false, false).unwrap();
        assert_eq!(dev.state().fifo_row_length, 14);
    }

    #[test]
    fn test_wom_single_axis() {
        let mut dev = device();
        dev.set_accel_wom_thresholds(0, 0, 40).unwrap();

        assert_eq!(dev.interface.get(registers::INT_ENABLE), bits::WOM_Z_INT);
        assert_eq!(dev.interface.get(registers::ACCEL_WOM_Z_THR), 40);
        let written = dev.interface.written_registers();
        assert!(!written.contains(&registers::ACCEL_WOM_X_THR));
        assert!(!written.contains(&registers::ACCEL_WOM_Y_THR));
        assert_eq!(
            written
                .iter()
                .filter(|r| **r == registers::INT_ENABLE)
                .count(),
            1
        );
        assert_eq!(
            dev.interface.get(registers::ACCEL_INTEL_CTRL),
            bits::ACCEL_INTEL_EN
        );
    }

    #[test]
    fn test_wom_all_zero_keeps_intel_enable() {
        let mut dev = device();
        dev.interface.set(registers::ACCEL_WOM_X_THR, 7);
        dev.set_accel_wom_thresholds(10, 20, 30).unwrap();
        assert_eq!(dev.interface.get(registers::INT_ENABLE), 0xE0);

        dev.interface.clear_log();
        dev.set_accel_wom_thresholds(0, 0, 0).unwrap();
        assert_eq!(dev.interface.get(registers::INT_ENABLE), 0x00);
        assert_eq!(
            dev.interface.get(registers::ACCEL_INTEL_CTRL),
            bits::ACCEL_INTEL_EN
        );
        // Los umbrales no se tocan al desactivar
        assert_eq!(dev.interface.get(registers::ACCEL_WOM_X_THR), 10);
        assert_eq!(dev.interface.written_registers(), vec![registers::INT_ENABLE]);
    }

    #[test]
    fn test_wom_preserves_other_int_bits() {
        let mut dev = device();
        dev.interface.set(registers::INT_ENABLE, bits::DATA_RDY_INT | bits::WOM_X_INT);
        dev.set_accel_wom_thresholds(0, 5, 0).unwrap();
        assert_eq!(
            dev.interface.get(registers::INT_ENABLE),
            bits::DATA_RDY_INT | bits::WOM_Y_INT
        );
    }

    #[test]
    fn test_accel_offset_round_trip() {
        let mut dev = device();
        let offset = OffsetTriple {
            x: 0x1234,
            y: 0xFFFE,
            z: 0x0001,
        };
        dev.set_accel_offset(offset).unwrap();
        assert_eq!(
            dev.interface.writes,
            vec![
                (registers::XA_OFFSET_H, vec![0x12, 0x34]),
                (registers::YA_OFFSET_H, vec![0xFF, 0xFE]),
                (registers::ZA_OFFSET_H, vec![0x00, 0x01]),
            ]
        );
        assert_eq!(dev.get_accel_offset().unwrap(), offset);
        assert_eq!(dev.interface.reads, vec![(registers::XA_OFFSET_H, 6)]);
    }

    #[test]
    fn test_gyro_offset_round_trip() {
        let mut dev = device();
        let offset = OffsetTriple {
            x: 0x8000,
            y: 0x7FFF,
            z: 0x00FF,
        };
        dev.set_gyro_offset(offset).unwrap();
        assert_eq!(dev.interface.get(registers::XG_OFFS_USRH), 0x80);
        assert_eq!(dev.interface.get(registers::ZG_OFFS_USRL), 0xFF);
        assert_eq!(dev.get_gyro_offset().unwrap(), offset);
    }

    #[test]
    fn test_range_not_cached_on_bus_failure() {
        let mut dev = device();
        dev.interface.fail_next(BusFault::Transport);
        assert_eq!(
            dev.set_accel_range(AccelFullScale::Fs4G),
            Err(Icm20602Error::Bus(BusFault::Transport))
        );
        assert_eq!(dev.state().accel_sensitivity_shift, 0);
    }

    #[test]
    fn test_axis_enable_write_failure_keeps_row_length() {
        let mut dev = device();
        dev.interface.fail_next_write(BusFault::Nack);
        assert_eq!(
            dev.set_accel_axis_enable(true, true, true),
            Err(Icm20602Error::Bus(BusFault::Nack))
        );
        assert_eq!(dev.state().fifo_row_length, 0);

        dev.set_accel_axis_enable(true, true, true).unwrap();
        dev.interface.fail_next_write(BusFault::Transport);
        assert!(dev.set_gyro_axis_enable(true, true, true).is_err());
        assert_eq!(dev.state().fifo_row_length, 8);
    }

    #[test]
    fn test_range_read_back() {
        let mut dev = device();
        dev.interface.set(registers::ACCEL_CONFIG, 0xE7);
        dev.interface.set(registers::GYRO_CONFIG, 0x03);
        assert_eq!(dev.accel_range().unwrap(), AccelFullScale::Fs2G);
        assert_eq!(dev.gyro_range().unwrap(), GyroFullScale::Fs250Dps);

        dev.set_accel_range(AccelFullScale::Fs8G).unwrap();
        dev.set_gyro_dps(GyroFullScale::Fs2000Dps).unwrap();
        assert_eq!(dev.accel_range().unwrap(), AccelFullScale::Fs8G);
        assert_eq!(dev.gyro_range().unwrap(), GyroFullScale::Fs2000Dps);
        // FCHOICE_B no se confunde con FS_SEL
        assert_eq!(dev.interface.get(registers::GYRO_CONFIG), 0x1B);
    }
}
