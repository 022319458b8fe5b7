// Uptime humanization: largest two units, days tier drops minutes.

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MIN: u64 = 60;

/// "2 days, 0 hours", "1 hour, 5 mins", "0 mins".
pub fn humanize_uptime(secs: u64) -> String {
    let days = secs / SECS_PER_DAY;
    let hours = (secs % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (secs % SECS_PER_HOUR) / SECS_PER_MIN;

    if days > 0 {
        format!("{}, {}", unit(days, "day"), unit(hours, "hour"))
    } else if hours > 0 {
        format!("{}, {}", unit(hours, "hour"), unit(minutes, "min"))
    } else {
        unit(minutes, "min")
    }
}

fn unit(value: u64, word: &str) -> String {
    if value == 1 {
        format!("1 {word}")
    } else {
        format!("{value} {word}s")
    }
}
