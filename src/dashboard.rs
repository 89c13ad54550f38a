// Result sink glue: renders the cycle's top list on the console and
// overwrites the dashboard CSV that the chart viewer polls. The row
// schema is token, name, rounded score, price, 5m change, liquidity.

use anyhow::Result;
use std::fmt::Write as _;

use crate::models::RankedPair;
use crate::utils::{format_number, format_price};

pub fn print_top(ranked: &[RankedPair]) {
    println!("\n🚀 TOP SOLANA PRE-PUMPS");
    println!("{}", "=".repeat(50));

    for (i, r) in ranked.iter().enumerate() {
        let p = &r.snapshot;
        println!("\n#{} {} ({})", i + 1, p.name(), p.symbol());
        println!("Score: {:.2}", r.score);
        println!("Price: {}", format_price(p.price_usd()));
        println!("5m: {:.2}%", p.change_m5());
        println!("Liquidity: ${}", format_number(p.liquidity_usd()));
    }
}

pub fn write_csv(path: &str, ranked: &[RankedPair]) -> Result<()> {
    let mut out = String::from("token,name,score,price_usd,change_5m_pct,liquidity_usd\n");

    for r in ranked {
        let p = &r.snapshot;
        writeln!(
            out,
            "{},{},{:.2},{},{:.2},{:.2}",
            csv_field(p.symbol()),
            csv_field(p.name()),
            r.score,
            p.price_usd(),
            p.change_m5(),
            p.liquidity_usd(),
        )?;
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
