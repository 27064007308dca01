//!
//! BMP280 pressure and temperature sensor on a Linux spidev bus
//!

use log::{debug, warn};

use bmp280_err::{Bmp280Error, ErrorKind, Result};

pub mod bus;
pub mod calibration;
pub mod compensation;
pub mod registers;
pub mod session;
pub mod transport;

#[cfg(test)]
mod mock;

pub use bus::{Bus, BusParams, SpidevBus, BUS_PARAMS};
pub use calibration::Calibration;
pub use compensation::Measurement;
pub use registers::{ChipId, ConfigFields, CtrlMeasFields, StatusFields};
pub use session::{Session, State};

use registers::*;
use transport::Transport;


//----------------------------------------------------------------------------------------------------------------------------------
/// An initialised sensor. Holding one means the bus is open, the chip id has been checked
/// and the calibration is loaded.
pub struct Bmp280<B: Bus = SpidevBus> {
    transport : Transport<B>,
    calibration : Calibration,
}


//----------------------------------------------------------------------------------------------------------------------------------
impl<B: Bus> Bmp280<B> {

    //------------------------------------------------------------------------------------------------------------------------------
    pub fn init(bus_path : &str) -> Result<Self> {
        let bus = B::open(bus_path).map_err(|error| {
            Bmp280Error::new(ErrorKind::Device, &format!("Could not open {}: {}", bus_path, error))
        })?;
        debug!("Opened {}", bus_path);
        Self::attach(bus)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    /// Brings up an already open bus. On failure the bus is closed before the error is returned.
    pub fn attach(bus : B) -> Result<Self> {
        let mut transport = Transport::new(bus);

        match Self::bring_up(&mut transport) {
            Ok(calibration) => Ok(Self { transport, calibration }),
            Err(error) => {
                warn!("BMP280 init failed: {}", error);
                if let Err(close_error) = transport.into_bus().close() {
                    warn!("Closing bus after failed init: {}", close_error);
                }
                Err(error)
            }
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn bring_up(transport : &mut Transport<B>) -> Result<Calibration> {
        transport.configure(&BUS_PARAMS)?;

        let id = ChipId::decode(transport.read_u8(ID_REG)?);
        if !id.is_bmp280() {
            return Err(Bmp280Error::new(ErrorKind::Device,
                &format!("Chip ID 0x{:x} does not match 0x{:x}", id.chip, CHIP_ID)));
        }

        let calibration = Calibration::load(transport)?;

        let config = default_config();
        let ctrl_meas = default_ctrl_meas();
        transport.write(CONFIG_REG, &[config.encode()])
            .and_then(|_| transport.write(CTRL_MEAS_REG, &[ctrl_meas.encode()]))
            .map_err(|error| Bmp280Error::new(ErrorKind::Spi, &format!("Could not set default config: {}", error)))?;

        Ok(calibration)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    /// Closes the bus. The handle is gone whatever the close reports.
    pub fn deinit(self) -> Result<()> {
        self.transport.into_bus().close()?;
        Ok(())
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn measure(&mut self) -> Result<Measurement> {
        let temp = self.transport.read(TEMP_MSB, 3)?;
        let press = self.transport.read(PRESS_MSB, 3)?;

        let raw_temp = compensation::raw_adc(&temp[1..]);
        let raw_press = compensation::raw_adc(&press[1..]);
        debug!("raw temperature {} raw pressure {}", raw_temp, raw_press);

        compensation::compensate(&self.calibration, raw_temp, raw_press)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn get_config(&mut self) -> Result<ConfigFields> {
        Ok(ConfigFields::decode(self.transport.read_u8(CONFIG_REG)?))
    }

    pub fn set_config(&mut self, standby : u8, filter_coefficient : u8) -> Result<()> {
        self.transport.write(CONFIG_REG, &[ConfigFields::new(standby, filter_coefficient).encode()])
    }

    pub fn get_ctrl_meas(&mut self) -> Result<CtrlMeasFields> {
        Ok(CtrlMeasFields::decode(self.transport.read_u8(CTRL_MEAS_REG)?))
    }

    pub fn set_ctrl_meas(&mut self, osrs_p : u8, osrs_t : u8, mode : u8) -> Result<()> {
        self.transport.write(CTRL_MEAS_REG, &[CtrlMeasFields::new(osrs_p, osrs_t, mode).encode()])
    }

    pub fn get_status(&mut self) -> Result<StatusFields> {
        Ok(StatusFields::decode(self.transport.read_u8(STATUS_REG)?))
    }

    pub fn get_chip_id(&mut self) -> Result<ChipId> {
        Ok(ChipId::decode(self.transport.read_u8(ID_REG)?))
    }
}
