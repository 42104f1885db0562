use api_types::WeekdayName;

/// Two or three letter weekday label, Portuguese.
#[must_use]
pub fn weekday_short(weekday: WeekdayName) -> &'static str {
    match weekday {
        WeekdayName::Monday => "Seg",
        WeekdayName::Tuesday => "Ter",
        WeekdayName::Wednesday => "Qua",
        WeekdayName::Thursday => "Qui",
        WeekdayName::Friday => "Sex",
        WeekdayName::Saturday => "Sáb",
        WeekdayName::Sunday => "Dom",
    }
}

/// Three letter month label, Portuguese. `month` is 1..=12.
#[must_use]
pub fn month_short(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Fev",
        3 => "Mar",
        4 => "Abr",
        5 => "Mai",
        6 => "Jun",
        7 => "Jul",
        8 => "Ago",
        9 => "Set",
        10 => "Out",
        11 => "Nov",
        12 => "Dez",
        _ => "???",
    }
}
