use crate::locale::Locale;
use crate::record::{Field, VehicleRecord};

/// Rendered lookup result, ready for the chat transport (Telegram HTML).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub photo_url: Option<String>,
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn render(field: &Field, locale: Locale) -> String {
    match field {
        Field::Known(value) => escape_html(value),
        Field::Missing(placeholder) => locale.placeholder(*placeholder).to_string(),
    }
}

/// Renders the fixed report template. Pure: same record and locale always
/// give the same text.
#[must_use]
pub fn format_report(record: &VehicleRecord, locale: Locale) -> Report {
    let l = locale.labels();
    let status = if record.is_stolen { l.wanted } else { l.clear };

    let text = format!(
        "🚘 <b>{title}: {vendor} {model} ({year})</b>\n\
         🔍 <i>{source_label}: {source}</i>\n\n\
         <b>{specs}:</b>\n\
         ▪️ {engine_label}: {engine}\n\
         ▪️ {color_label}: {color}\n\n\
         <b>{history}:</b>\n\
         👥 {registrations}: {owners}\n\
         🛣 {mileage_label}: {mileage}\n\
         💥 {accidents_label}: {accidents}\n\n\
         <b>{status_label}:</b>\n\
         {status}",
        title = l.report_title,
        vendor = render(&record.vendor, locale),
        model = render(&record.model, locale),
        year = render(&record.year, locale),
        source_label = l.source,
        source = escape_html(&record.source),
        specs = l.specs,
        engine_label = l.engine,
        engine = render(&record.engine, locale),
        color_label = l.color,
        color = render(&record.color, locale),
        history = l.history,
        registrations = l.registrations,
        owners = render(&record.owners_count, locale),
        mileage_label = l.mileage,
        mileage = render(&record.mileage, locale),
        accidents_label = l.accidents,
        accidents = render(&record.accidents, locale),
        status_label = l.status,
    );

    Report {
        text,
        photo_url: record.photo_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> VehicleRecord {
        let mut record = VehicleRecord::new("B");
        record.set_vendor("HONDA");
        record.set_model("ACCORD");
        record.set_year("2003");
        record.set_engine("Petrol, 2.4");
        record.set_color("Silver");
        record.set_mileage("182 тис. км");
        record.set_owners_count("3");
        record
    }

    #[test]
    fn known_fields_appear_verbatim() {
        let record = full_record();
        for locale in [Locale::Ru, Locale::En] {
            let report = format_report(&record, locale);
            for value in [
                "HONDA",
                "ACCORD",
                "2003",
                "Petrol, 2.4",
                "Silver",
                "182 тис. км",
                "3",
            ] {
                assert!(report.text.contains(value), "{locale}: missing {value}");
            }
            assert!(report.text.contains("HONDA ACCORD (2003)"));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = full_record();
        assert_eq!(
            format_report(&record, Locale::En),
            format_report(&record, Locale::En)
        );
    }

    #[test]
    fn placeholders_follow_the_locale() {
        let record = VehicleRecord::new("A");

        let ru = format_report(&record, Locale::Ru).text;
        assert!(ru.contains("Неизвестно Неизвестно (Нет данных)"));
        assert!(ru.contains("Пробег: Нет записей"));
        assert!(ru.contains("ДТП: Нет записей"));

        let en = format_report(&record, Locale::En).text;
        assert!(en.contains("Unknown Unknown (No data)"));
        assert!(en.contains("Mileage: No records"));
        assert!(en.contains("Registration records: No data"));
        assert!(!en.contains("Нет"));
    }

    #[test]
    fn stolen_flag_selects_the_status_line() {
        let mut record = full_record();
        record.is_stolen = true;
        let wanted = format_report(&record, Locale::Ru).text;
        assert!(wanted.contains("В РОЗЫСКЕ!"));
        assert!(!wanted.contains("В розыске не числится"));

        record.is_stolen = false;
        let clear = format_report(&record, Locale::En).text;
        assert!(clear.contains("Not on the wanted list"));
        assert!(!clear.contains("WANTED!"));
    }

    #[test]
    fn photo_url_is_passed_through() {
        let mut record = full_record();
        assert!(format_report(&record, Locale::Ru).photo_url.is_none());

        record.set_photo_url(Some("https://img.example/car.jpg".to_string()));
        assert_eq!(
            format_report(&record, Locale::Ru).photo_url.as_deref(),
            Some("https://img.example/car.jpg")
        );
    }

    #[test]
    fn provider_text_is_html_escaped() {
        let mut record = full_record();
        record.set_model("<b>A&B</b>");
        let text = format_report(&record, Locale::En).text;
        assert!(text.contains("&lt;b&gt;A&amp;B&lt;/b&gt;"));
    }
}
