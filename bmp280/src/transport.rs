//!
//! Single-register and burst SPI framing for the BMP280
//!

use bmp280_err::{Bmp280Error, ErrorKind, Result};
use crate::bus::{Bus, BusParams};

/// Bit 7 of the address byte selects a read
const READ_BIT : u8 = 0x80;


//----------------------------------------------------------------------------------------------------------------------------------
pub struct Transport<B: Bus> {
    bus : B
}


//----------------------------------------------------------------------------------------------------------------------------------
impl<B: Bus> Transport<B> {

    //------------------------------------------------------------------------------------------------------------------------------
    pub fn new(bus : B) -> Self {
        Self { bus }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn configure(&mut self, params : &BusParams) -> Result<()> {
        self.bus.configure(params).map_err(|error| {
            Bmp280Error::new(ErrorKind::Spi, &format!("Could not apply SPI settings {:?}: {}", params, error))
        })
    }


    //------------------------------------------------------------------------------------------------------------------------------
    /// Reads `length` bytes starting at `address`. Byte 0 of the returned frame is the
    /// echo clocked in while the address went out; the payload is `frame[1..=length]`.
    pub fn read(&mut self, address : u8, length : usize) -> Result<Vec<u8>> {
        let mut tx = vec![0u8; length + 1];
        tx[0] = address | READ_BIT;
        let mut rx = vec![0u8; length + 1];

        let count = self.bus.exchange(&tx, &mut rx)?;
        Self::check_count(address, count, length + 1)?;
        Ok(rx)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn write(&mut self, address : u8, payload : &[u8]) -> Result<()> {
        let mut tx = Vec::with_capacity(payload.len() + 1);
        tx.push(address & !READ_BIT);
        tx.extend_from_slice(payload);
        let mut rx = vec![0u8; tx.len()];

        let count = self.bus.exchange(&tx, &mut rx)?;
        Self::check_count(address, count, tx.len())
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn read_u8(&mut self, address : u8) -> Result<u8> {
        Ok(self.read(address, 1)?[1])
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn into_bus(self) -> B {
        self.bus
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn check_count(address : u8, count : usize, expected : usize) -> Result<()> {
        if count != expected {
            return Err(Bmp280Error::new(ErrorKind::Spi,
                &format!("SPI transfer at 0x{:x} moved {} of {} bytes", address, count, expected)));
        }
        Ok(())
    }
}
