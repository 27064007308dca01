//!
//! Raw full-duplex byte transport underneath the driver
//!

use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
use std::io;

//----------------------------------------------------------------------------------------------------------------------------------
/// Transfer settings applied once when the bus is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusParams {
    pub mode : u8,
    pub word_size_bits : u8,
    pub clock_speed_hz : u32,
    pub delay_us : u16,
}

pub const BUS_PARAMS : BusParams = BusParams {
    mode : 0,
    word_size_bits : 8,
    clock_speed_hz : 50_000,
    delay_us : 100,
};


//----------------------------------------------------------------------------------------------------------------------------------
pub trait Bus: Sized {
    fn open(path : &str) -> io::Result<Self>;

    fn configure(&mut self, params : &BusParams) -> io::Result<()>;

    /// Clocks `tx` out while filling `rx`, returning the number of bytes exchanged.
    fn exchange(&mut self, tx : &[u8], rx : &mut [u8]) -> io::Result<usize>;

    fn close(self) -> io::Result<()>;
}


//----------------------------------------------------------------------------------------------------------------------------------
pub struct SpidevBus {
    spi : Spidev,
    params : BusParams,
}


//----------------------------------------------------------------------------------------------------------------------------------
impl Bus for SpidevBus {

    //------------------------------------------------------------------------------------------------------------------------------
    fn open(path : &str) -> io::Result<Self> {
        Ok(Self {
            spi : Spidev::open(path)?,
            params : BUS_PARAMS,
        })
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn configure(&mut self, params : &BusParams) -> io::Result<()> {
        let options = SpidevOptions::new()
            .bits_per_word(params.word_size_bits)
            .max_speed_hz(params.clock_speed_hz)
            .lsb_first(false)
            .mode(SpiModeFlags::from_bits_truncate(params.mode as u32))
            .build();

        self.spi.configure(&options)?;
        self.params = *params;
        Ok(())
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn exchange(&mut self, tx : &[u8], rx : &mut [u8]) -> io::Result<usize> {
        let mut transfer = SpidevTransfer::read_write(tx, rx);
        transfer.speed_hz = self.params.clock_speed_hz;
        transfer.delay_usecs = self.params.delay_us;
        transfer.bits_per_word = self.params.word_size_bits;

        // the ioctl either clocks the whole message or fails
        self.spi.transfer(&mut transfer)?;
        Ok(tx.len())
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn close(self) -> io::Result<()> {
        // spidev closes the device file on drop
        drop(self.spi);
        Ok(())
    }
}
