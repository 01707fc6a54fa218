use header_forensics::analyzer::AnalysisEngine;
use header_forensics::geo::GeoResolver;
use header_forensics::Config;

/// Canned labels so the walkthrough runs without network access.
struct CannedResolver;

impl GeoResolver for CannedResolver {
    async fn resolve(&self, ip: &str) -> String {
        match ip {
            "203.0.113.7" => "Moscow, RU (AS12345 BulletProof Hosting)".to_string(),
            "198.51.100.22" => "Ashburn, US (AS14618 Amazon.com, Inc.)".to_string(),
            _ => "?, ? (Unknown ISP)".to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Analyzing a suspicious header sample offline...");
    println!();

    let raw = "\
Received: from smtp.example.ru (smtp.example.ru [203.0.113.7]) by mx.victim.example with ESMTP
Received: from webmail.victim.example (unknown [198.51.100.22]) by smtp.example.ru
Received: by internal.victim.example with local delivery
Date: Mon, 1 Jan 2024 00:00:00 +0000
From: \"Accounts Team\" <billing@paypal-security.example.ru>
To: victim@victim.example
Subject: Invoice attached - report.zip
Message-ID: <20240101000000.7F2A@smtp.example.ru>
Authentication-Results: mx.victim.example; spf=softfail; dkim=fail; dmarc=none
";

    let engine = AnalysisEngine::new(&Config::default(), CannedResolver)?;
    let result = engine.analyze(raw).await;

    println!("{}", engine.render(&result));

    println!("Hops (document order, most recent first):");
    for (i, hop) in result.hops.iter().enumerate() {
        match (&hop.source_ip, &hop.geo_label) {
            (Some(ip), Some(label)) => println!("  {}. {} -> {}", i + 1, ip, label),
            _ => println!("  {}. no source address on this hop", i + 1),
        }
    }

    Ok(())
}
