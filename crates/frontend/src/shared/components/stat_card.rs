use leptos::prelude::*;

/// 1234 -> "1 234" (неразрывный пробел)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{00a0}');
        }
        out.push(ch);
    }
    out
}

/// Карточка со счётчиком
#[component]
pub fn StatCard(
    /// Label displayed under the value
    label: &'static str,
    /// Модификатор класса: new / in_progress / completed
    modifier: &'static str,
    #[prop(into)]
    value: Signal<u64>,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card stat-card--{}", modifier)>
            <div class="stat-card__value">{move || format_count(value.get())}</div>
            <div class="stat-card__label">{label}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1\u{00a0}000");
        assert_eq!(format_count(1234567), "1\u{00a0}234\u{00a0}567");
    }
}
