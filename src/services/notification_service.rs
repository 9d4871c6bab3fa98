use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use tracing::info;

use crate::external::telegram::{NotifyError, TelegramClient};
use crate::models::{GoldPriceRecord, Instrument};
use crate::services::crawl_service::CrawlService;

// ==============================================================================
// Notification Service
// ==============================================================================

/// Posts the daily gold price table to a Telegram chat.
pub struct NotificationService {
    crawler: Arc<CrawlService>,
    telegram: TelegramClient,
    offset: FixedOffset,
}

impl NotificationService {
    pub fn new(crawler: Arc<CrawlService>, telegram: TelegramClient, offset: FixedOffset) -> Self {
        Self {
            crawler,
            telegram,
            offset,
        }
    }

    /// Builds the table from the current snapshot and sends it.
    /// Returns the number of instruments included.
    pub async fn send_gold_price_notification(&self) -> Result<usize, NotifyError> {
        let snapshot = self.crawler.snapshot().await;
        let now = Utc::now().with_timezone(&self.offset);

        let message = format_gold_price_message(&snapshot, now);
        self.telegram.send_html(&message).await?;

        info!("Gold price notification sent ({} instruments)", snapshot.len());
        Ok(snapshot.len())
    }
}

// ==============================================================================
// Message Formatting
// ==============================================================================

/// Renders today's prices and the change since yesterday as an HTML `<pre>` table.
///
/// Days are matched by their `dd/mm` label. A day with no entry reads as zero.
pub fn format_gold_price_message(
    snapshot: &BTreeMap<Instrument, GoldPriceRecord>,
    now: DateTime<FixedOffset>,
) -> String {
    let today = now.format("%d/%m").to_string();
    let yesterday = (now - Duration::days(1)).format("%d/%m").to_string();

    let mut out = String::new();
    let _ = writeln!(out, "💰 <b>BẢNG GIÁ VÀNG NGÀY {}</b> 💰", today);
    out.push_str("<pre>\n");
    out.push_str("| CỬA HÀNG        | MUA VÀO (THAY ĐỔI) | BÁN RA (THAY ĐỔI) |\n");
    out.push_str("|-----------------|--------------------|--------------------|\n");

    for instrument in Instrument::DISPLAY_ORDER {
        let Some(record) = snapshot.get(&instrument) else {
            continue;
        };

        let current = record.quote_on(&today).unwrap_or_default();
        let previous = record.quote_on(&yesterday).unwrap_or_default();

        let _ = writeln!(
            out,
            "| {:<15} | {:>6} ({}) | {:>6} ({}) |",
            instrument.display_name(),
            format_millions(current.buy),
            change_label(current.buy, previous.buy),
            format_millions(current.sell),
            change_label(current.sell, previous.sell),
        );
    }

    out.push_str("</pre>\n");
    let _ = writeln!(out, "📊 So sánh với ngày {}", yesterday);
    let _ = write!(out, "⏰ Cập nhật: {}", now.format("%H:%M %d/%m/%Y"));

    out
}

fn format_millions(price: f64) -> String {
    format!("{:.1}", price / 1e6)
}

fn change_label(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return "↔ 0.0 (0.0%)".to_string();
    }

    let diff = (current - previous) / 1e6;
    let percent = (current - previous) / previous * 100.0;

    if diff > 0.0 {
        format!("↑{:.1} ({:.1}%)", diff.abs(), percent.abs())
    } else if diff < 0.0 {
        format!("↓{:.1} ({:.1}%)", diff.abs(), percent.abs())
    } else {
        "↔0.0 (0.0%)".to_string()
    }
}
