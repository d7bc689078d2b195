//! Cabinet controls and DIP switches.
//!
//! Port 1:
//! ```text
//! bit 0  coin slot (1 = coin inserted)
//! bit 1  2P start
//! bit 2  1P start
//! bit 4  1P fire
//! bit 5  1P left
//! bit 6  1P right
//! ```
//!
//! Port 2:
//! ```text
//! bits 0-1  DIP: ships per game (00 = 3, 01 = 4, 10 = 5, 11 = 6)
//! bit 2     tilt
//! bit 3     DIP: extra ship at 1000 points (0 = at 1500)
//! bit 4     2P fire
//! bit 5     2P left
//! bit 6     2P right
//! bit 7     DIP: coin info hidden in attract mode
//! ```
//!
//! All inputs are active high.

/// One of the two input ports the game reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPort {
    Port1,
    Port2,
}

/// A cabinet button or switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    P1Start,
    P2Start,
    P1Fire,
    P1Left,
    P1Right,
    P2Fire,
    P2Left,
    P2Right,
    Tilt,
}

impl Button {
    /// Port and bit mask this button drives.
    #[must_use]
    pub const fn wiring(self) -> (InputPort, u8) {
        match self {
            Button::Coin => (InputPort::Port1, 0x01),
            Button::P2Start => (InputPort::Port1, 0x02),
            Button::P1Start => (InputPort::Port1, 0x04),
            Button::P1Fire => (InputPort::Port1, 0x10),
            Button::P1Left => (InputPort::Port1, 0x20),
            Button::P1Right => (InputPort::Port1, 0x40),
            Button::Tilt => (InputPort::Port2, 0x04),
            Button::P2Fire => (InputPort::Port2, 0x10),
            Button::P2Left => (InputPort::Port2, 0x20),
            Button::P2Right => (InputPort::Port2, 0x40),
        }
    }
}

/// Port 2 mask of the ship-count DIP switches.
pub const SHIPS_MASK: u8 = 0x03;
/// Port 2 DIP: award the extra ship at 1000 points instead of 1500.
pub const EXTRA_SHIP_MASK: u8 = 0x08;
/// Port 2 DIP: hide coin info in attract mode.
pub const COIN_INFO_MASK: u8 = 0x80;

/// Ships per game, set by two DIP switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShipCount {
    #[default]
    Three,
    Four,
    Five,
    Six,
}

impl ShipCount {
    /// Port 2 bits 0-1 for this setting.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            ShipCount::Three => 0b00,
            ShipCount::Four => 0b01,
            ShipCount::Five => 0b10,
            ShipCount::Six => 0b11,
        }
    }

    #[must_use]
    pub const fn from_count(ships: u8) -> Option<Self> {
        match ships {
            3 => Some(ShipCount::Three),
            4 => Some(ShipCount::Four),
            5 => Some(ShipCount::Five),
            6 => Some(ShipCount::Six),
            _ => None,
        }
    }
}

/// DIP switch settings, applied to port 2 at power-on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DipSwitches {
    pub ships: ShipCount,
    pub extra_ship_at_1000: bool,
    pub coin_info_hidden: bool,
}

impl DipSwitches {
    /// Port 2 bits these switches drive.
    #[must_use]
    pub const fn port2_bits(self) -> u8 {
        let mut bits = self.ships.bits();
        if self.extra_ship_at_1000 {
            bits |= EXTRA_SHIP_MASK;
        }
        if self.coin_info_hidden {
            bits |= COIN_INFO_MASK;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_are_distinct_bits() {
        let all = [
            Button::Coin,
            Button::P1Start,
            Button::P2Start,
            Button::P1Fire,
            Button::P1Left,
            Button::P1Right,
            Button::P2Fire,
            Button::P2Left,
            Button::P2Right,
            Button::Tilt,
        ];
        let mut port1 = 0u8;
        let mut port2 = 0u8;
        for button in all {
            let (port, mask) = button.wiring();
            assert_eq!(mask.count_ones(), 1, "{button:?}");
            let used = match port {
                InputPort::Port1 => &mut port1,
                InputPort::Port2 => &mut port2,
            };
            assert_eq!(*used & mask, 0, "{button:?} overlaps");
            *used |= mask;
        }
        // Buttons never touch the DIP switch bits.
        assert_eq!(port2 & (SHIPS_MASK | EXTRA_SHIP_MASK | COIN_INFO_MASK), 0);
    }

    #[test]
    fn ship_count_bits() {
        assert_eq!(ShipCount::from_count(3).map(ShipCount::bits), Some(0));
        assert_eq!(ShipCount::from_count(5).map(ShipCount::bits), Some(2));
        assert_eq!(ShipCount::from_count(6).map(ShipCount::bits), Some(3));
        assert_eq!(ShipCount::from_count(7), None);
    }

    #[test]
    fn dip_bits_combine() {
        let dips = DipSwitches {
            ships: ShipCount::Four,
            extra_ship_at_1000: true,
            coin_info_hidden: true,
        };
        assert_eq!(dips.port2_bits(), 0b1000_1001);
        assert_eq!(DipSwitches::default().port2_bits(), 0);
    }
}
