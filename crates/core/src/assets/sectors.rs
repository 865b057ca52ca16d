//! Sector classification for Casablanca Stock Exchange tickers.

/// Sector for a CSE ticker symbol. Tickers missing from the table
/// classify as "Unknown"; the table is reference data, not exhaustive.
pub fn sector_for_ticker(ticker: &str) -> &'static str {
    match ticker.to_uppercase().as_str() {
        "ATW" | "BCP" | "BOA" | "CIH" | "CDM" | "BMCI" => "Banks",
        "IAM" => "Telecoms",
        "TQM" => "Utilities",
        "GAZ" | "TMA" => "Oil & Gas",
        "LHM" | "CMT" | "SID" => "Construction & Materials",
        "MNG" | "SMI" | "CMA" => "Mining",
        "CSR" | "LES" | "SBM" | "MUT" | "UMR" => "Food & Beverages",
        "HPS" | "MDP" | "DWY" | "IB" => "Software & IT Services",
        "ADH" | "RDS" | "ARD" => "Real Estate",
        "WAA" | "SAH" | "ATL" => "Insurance",
        "LBV" | "MAB" => "Retail",
        "AKT" | "DLM" | "SNA" | "NEX" => "Industrials",
        "MSA" | "RIS" => "Leisure & Hotels",
        "EQD" | "ALM" => "Transport & Logistics",
        "SOT" | "NKL" | "DIS" => "Holding & Diversified",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tickers_resolve() {
        assert_eq!(sector_for_ticker("ATW"), "Banks");
        assert_eq!(sector_for_ticker("iam"), "Telecoms");
    }

    #[test]
    fn unknown_tickers_fall_back() {
        assert_eq!(sector_for_ticker("ZZZ"), "Unknown");
        assert_eq!(sector_for_ticker(""), "Unknown");
    }
}
