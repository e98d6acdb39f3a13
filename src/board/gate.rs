//! Pin enable table

use super::PIN_COUNT;
use crate::config::Gating;

/// Fixed table of per-pin write gates.
///
/// With [`Gating::Off`] every pin always allows writes and the table is
/// never consulted. Otherwise each pin starts in the state the gating mode
/// names and only changes through [`enable`](Self::enable) /
/// [`disable`](Self::disable). The set of pins never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinGate {
    mode: Gating,
    gates: [bool; PIN_COUNT],
}

impl PinGate {
    /// Create a table initialised according to `mode`.
    pub fn new(mode: Gating) -> Self {
        let initial = !matches!(mode, Gating::InitiallyDisabled);
        Self {
            mode,
            gates: [initial; PIN_COUNT],
        }
    }

    /// The gating mode this table was built with.
    pub fn mode(&self) -> Gating {
        self.mode
    }

    /// Whether a write to `pin` may reach the hardware.
    ///
    /// Pins outside the table are never allowed.
    pub fn allows(&self, pin: u8) -> bool {
        match self.mode {
            Gating::Off => (pin as usize) < PIN_COUNT,
            _ => self.is_enabled(pin),
        }
    }

    /// Raw gate state, regardless of mode.
    pub fn is_enabled(&self, pin: u8) -> bool {
        self.gates.get(pin as usize).copied().unwrap_or(false)
    }

    /// Open the gate for `pin`. Out of range pins are ignored.
    pub fn enable(&mut self, pin: u8) {
        self.set(pin, true);
    }

    /// Close the gate for `pin`. Out of range pins are ignored.
    pub fn disable(&mut self, pin: u8) {
        self.set(pin, false);
    }

    fn set(&mut self, pin: u8, enabled: bool) {
        if let Some(gate) = self.gates.get_mut(pin as usize) {
            *gate = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_allows_every_pin() {
        let mut gate = PinGate::new(Gating::Off);
        gate.disable(4);
        assert!(gate.allows(4));
        assert!(gate.allows(13));
        assert!(!gate.allows(14));
    }

    #[test]
    fn test_initially_disabled() {
        let mut gate = PinGate::new(Gating::InitiallyDisabled);
        assert!((0..PIN_COUNT as u8).all(|pin| !gate.allows(pin)));

        gate.enable(2);
        assert!(gate.allows(2));
        assert!(!gate.allows(3));
    }

    #[test]
    fn test_initially_enabled_can_be_closed() {
        let mut gate = PinGate::new(Gating::InitiallyEnabled);
        assert!(gate.allows(7));

        gate.disable(7);
        assert!(!gate.allows(7));
        assert!(gate.allows(8));
    }

    #[test]
    fn test_out_of_range_pin_is_ignored() {
        let mut gate = PinGate::new(Gating::InitiallyDisabled);
        gate.enable(200);
        assert!(!gate.is_enabled(200));
        assert!(!gate.allows(200));
    }
}
