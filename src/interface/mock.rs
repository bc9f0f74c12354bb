//! Interfaz simulada para las pruebas unitarias del driver

use super::Interface;
use crate::device::{BusFault, Icm20602Error};

/// Banco de 128 registros que registra cada escritura
#[derive(Debug, Clone)]
pub struct MockInterface {
    pub registers: [u8; 128],
    /// Escrituras en orden: (registro inicial, bytes)
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Lecturas en orden: (registro inicial, longitud)
    pub reads: Vec<(u8, usize)>,
    fail_next: Option<BusFault>,
    fail_next_write: Option<BusFault>,
}

impl MockInterface {
    pub fn new() -> Self {
        Self {
            registers: [0u8; 128],
            writes: Vec::new(),
            reads: Vec::new(),
            fail_next: None,
            fail_next_write: None,
        }
    }

    /// Hace fallar la próxima transferencia con `fault`
    pub fn fail_next(&mut self, fault: BusFault) {
        self.fail_next = Some(fault);
    }

    /// Hace fallar la próxima escritura; las lecturas siguen funcionando
    pub fn fail_next_write(&mut self, fault: BusFault) {
        self.fail_next_write = Some(fault);
    }

    pub fn set(&mut self, reg: u8, value: u8) {
        self.registers[reg as usize] = value;
    }

    pub fn get(&self, reg: u8) -> u8 {
        self.registers[reg as usize]
    }

    /// Carga una palabra big-endian en `reg`/`reg + 1`
    pub fn set_word(&mut self, reg: u8, value: i16) {
        let [h, l] = value.to_be_bytes();
        self.set(reg, h);
        self.set(reg + 1, l);
    }

    /// Registros escritos, en orden
    pub fn written_registers(&self) -> Vec<u8> {
        self.writes.iter().map(|(reg, _)| *reg).collect()
    }

    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.reads.clear();
    }

    fn take_fault(&mut self) -> Result<(), Icm20602Error> {
        match self.fail_next.take() {
            Some(fault) => Err(Icm20602Error::Bus(fault)),
            None => Ok(()),
        }
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl Interface for MockInterface {
    type Error = Icm20602Error;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.take_fault()?;
        if let Some(fault) = self.fail_next_write.take() {
            return Err(Icm20602Error::Bus(fault));
        }
        for (i, value) in data.iter().enumerate() {
            self.registers[reg as usize + i] = *value;
        }
        self.writes.push((reg, data.to_vec()));
        Ok(())
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.take_fault()?;
        let start = reg as usize;
        data.copy_from_slice(&self.registers[start..start + data.len()]);
        self.reads.push((reg, data.len()));
        Ok(())
    }
}
