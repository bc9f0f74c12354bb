//! Configuración del FIFO e interrupciones del ICM20602
//!
//! Sólo se lee el contador del FIFO; el contenido de las filas no se
//! interpreta aquí.

use crate::conversion::be_u16;
use crate::device::{Icm20602, Icm20602Error};
use crate::interface::Interface;
use crate::register::registers;
use crate::types::{bits, data_defs, set_bits};

/// Estado de INT_STATUS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptStatus {
    pub data_ready: bool,
    pub gdrive: bool,
    pub fifo_overflow: bool,
    pub wom_x: bool,
    pub wom_y: bool,
    pub wom_z: bool,
}

impl From<u8> for InterruptStatus {
    fn from(reg: u8) -> Self {
        Self {
            data_ready: reg & bits::DATA_RDY_INT != 0,
            gdrive: reg & bits::GDRIVE_INT != 0,
            fifo_overflow: reg & bits::FIFO_OFLOW_INT != 0,
            wom_x: reg & bits::WOM_X_INT != 0,
            wom_y: reg & bits::WOM_Y_INT != 0,
            wom_z: reg & bits::WOM_Z_INT != 0,
        }
    }
}

/// Umbral de watermark en bytes para `rows` filas de `row_length` bytes
///
/// Con filas de 14 bytes se limita a 72 filas y con filas de 8 a 126. Si el
/// ancho de fila aún no se conoce, `rows` se devuelve sin modificar.
pub fn watermark_bytes(rows: u16, row_length: u8) -> u16 {
    match row_length {
        data_defs::FIFO_ROW_BOTH => {
            rows.min(data_defs::MAX_WATERMARK_ROWS_BOTH) * data_defs::FIFO_ROW_BOTH as u16
        }
        data_defs::FIFO_ROW_SINGLE => {
            rows.min(data_defs::MAX_WATERMARK_ROWS_SINGLE) * data_defs::FIFO_ROW_SINGLE as u16
        }
        _ => rows,
    }
}

impl<I, E> Icm20602<I>
where
    I: Interface<Error = E>,
    Icm20602Error: From<E>,
{
    /// Activa la escritura de acelerómetro y/o giroscopio en el FIFO
    ///
    /// USER_CTRL.FIFO_EN queda activo si alguno de los dos lo está.
    pub fn set_fifo_enable(&mut self, accel: bool, gyro: bool) -> Result<(), Icm20602Error> {
        self.modify_reg(registers::FIFO_EN, |val| {
            let val = set_bits(val, bits::ACCEL_FIFO_EN, accel);
            set_bits(val, bits::GYRO_FIFO_EN, gyro)
        })?;
        self.modify_reg(registers::USER_CTRL, |val| {
            set_bits(val, bits::FIFO_EN, accel || gyro)
        })
    }

    /// Habilita la interrupción de desbordamiento del FIFO con latch
    ///
    /// `enable` no se usa: ambos bits se escriben siempre.
    pub fn set_fifo_interrupt(&mut self, enable: bool) -> Result<(), Icm20602Error> {
        log::trace!("set_fifo_interrupt ignores its argument ({})", enable);
        self.write_reg(registers::INT_PIN_CFG, bits::LATCH_INT_EN)?;
        self.write_reg(registers::INT_ENABLE, bits::FIFO_OFLOW_INT)
    }

    /// Umbral de watermark en filas. Devuelve el valor en bytes escrito.
    pub fn set_watermark_threshold(&mut self, rows: u16) -> Result<u16, Icm20602Error> {
        let row_length = self.base_state.fifo_row_length;
        if row_length == 0 {
            log::warn!(
                "FIFO row length not set, watermark {} written without clamping",
                rows
            );
        }
        let threshold = watermark_bytes(rows, row_length);

        self.write_reg(registers::CONFIG, 0)?;
        self.write_regs(registers::FIFO_WM_TH1, &threshold.to_be_bytes())?;
        log::debug!("watermark {} rows -> {} bytes", rows, threshold);
        Ok(threshold)
    }

    /// Número de bytes en el FIFO
    pub fn read_fifo_count(&mut self) -> Result<u16, Icm20602Error> {
        let mut count = [0u8; 2];
        self.read_regs(registers::FIFO_COUNTH, &mut count)?;
        Ok(be_u16(count[0], count[1]))
    }

    /// Contador del FIFO con datos de acelerómetro y temperatura
    pub fn read_fifo_accel(&mut self) -> Result<u16, Icm20602Error> {
        self.read_fifo_count()
    }

    /// Contador del FIFO con datos de temperatura y giroscopio
    pub fn read_fifo_gyro(&mut self) -> Result<u16, Icm20602Error> {
        self.read_fifo_count()
    }

    pub fn read_fifo_accel_gyro(&mut self) -> Result<u16, Icm20602Error> {
        self.read_fifo_count()
    }

    pub fn read_interrupt_status(&mut self) -> Result<InterruptStatus, Icm20602Error> {
        Ok(InterruptStatus::from(self.read_reg(registers::INT_STATUS)?))
    }

    pub fn fifo_watermark_reached(&mut self) -> Result<bool, Icm20602Error> {
        Ok(self.read_reg(registers::FIFO_WM_INT_STATUS)? & bits::FIFO_WM_INT != 0)
    }
}
