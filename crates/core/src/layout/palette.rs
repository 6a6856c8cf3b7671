/// Stable hue in degrees for a process id, shifted by a per-panel offset
/// so the same process reads as related but distinct across panels.
pub fn hue_for_pid(pid: &str, offset: u16) -> u16 {
    let h = pid
        .chars()
        .fold(0u32, |h, c| (h * 31 + u32::from(c)) % 360);
    ((h + u32::from(offset)) % 360) as u16
}
