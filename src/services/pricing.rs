/// Total for a booking: unit rate times players. No rounding, tax, or fees.
///
/// Pass the rate captured when the booking was initiated, never a refreshed one.
pub fn price(unit_rate: f64, player_count: u32) -> f64 {
    unit_rate * f64::from(player_count)
}
