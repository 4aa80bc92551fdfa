use anyhow::Result;
use chrono::Utc;
use std::env;

use kofa_sentinel::SecuritySession;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "export" {
        // Export mode: entry log as JSON
        run_export()?;
    } else {
        // Console report (default)
        run_report()?;
    }

    Ok(())
}

fn run_report() -> Result<()> {
    println!("🛡️  KofaSentinel - Facility Access Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let session = SecuritySession::with_demo_data();
    let now = Utc::now();
    let snapshot = session.dashboard(now);

    // 1. Overview cards
    println!("\n📊 Overview");
    println!("✓ Total entries: {}", snapshot.total_entries);
    println!(
        "✓ Today: {} (avg {:.1}/hr)",
        snapshot.today_count, snapshot.avg_hourly_rate
    );
    match snapshot.weekly_growth {
        Some(pct) => println!(
            "✓ This week: {} ({:+.1}% vs prior week)",
            snapshot.week_count, pct
        ),
        None => println!(
            "✓ This week: {} (no prior-week baseline)",
            snapshot.week_count
        ),
    }
    println!("✓ This month: {}", snapshot.month_count);

    // 2. Vehicle type breakdown
    println!("\n🚗 Vehicle types ({})", snapshot.distinct_types);
    for type_count in &snapshot.vehicle_types {
        println!(
            "  {:<12} {:>3}  ({:.0}%)",
            type_count.label, type_count.count, type_count.share
        );
    }

    // 3. Recent entries, newest first
    println!("\n🕒 Recent entries");
    for entry in session.entries().most_recent(15) {
        println!(
            "  {}  {:<8} {:<6} {:<14} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.plate_number,
            entry.vehicle_type,
            entry.driver_name,
            entry.purpose
        );
    }

    // 4. Blacklist rules
    println!("\n⛔ Blacklist rules");
    for rule in session.blacklist().rules() {
        println!(
            "  [{}] {} - {} (added {} by {})",
            rule.status.as_str(),
            rule.plate_number,
            rule.reason,
            rule.added_date,
            rule.added_by
        );
    }

    // 5. Flagged feed, chronological tail
    let flagged = session.flagged_entries();
    println!("\n🚩 Recent flagged entries");
    if flagged.is_empty() {
        println!("  (none)");
    } else {
        for entry in flagged.iter().skip(flagged.len().saturating_sub(8)) {
            println!(
                "  {}  {} - {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.plate_number,
                entry.driver_name
            );
        }
    }

    // 6. Security statistics
    let security = session.security();
    println!("\n🔒 Security statistics");
    println!("✓ Active rules: {}", security.active_count);
    println!("✓ Suspended rules: {}", security.suspended_count);
    println!("✓ Flagged entries: {}", security.flagged_count);
    println!("✓ Total rules: {}", security.total_count);

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📋 {}", snapshot.summary());

    Ok(())
}

fn run_export() -> Result<()> {
    let session = SecuritySession::with_demo_data();
    let json = serde_json::to_string_pretty(&session.entries().all())?;
    println!("{}", json);

    Ok(())
}
