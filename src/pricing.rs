use crate::error::PricingError;

/// Pricing rule for one brand. Surcharge and override tables are ordered
/// slices: the first entry whose substring appears in the venue wins.
/// Matching is substring containment throughout — a venue name embedding
/// another venue's name will match that entry first.
#[derive(Debug, Clone, Copy)]
pub struct PricingRule {
    pub brand: &'static str,
    pub base_price: i64,
    /// Album tier → price delta. Unknown tiers add nothing.
    pub album_prices: &'static [(&'static str, i64)],
    /// Region substring → travel surcharge.
    pub location_surcharge: &'static [(&'static str, i64)],
    /// Venue substring → fixed price replacing the whole computation.
    pub special_rules: &'static [(&'static str, i64)],
}

/// Static per-brand pricing table; loaded once, read-only.
pub const PRICING_RULES: &[PricingRule] = &[
    PricingRule {
        brand: "K 세븐스",
        base_price: 140_000,
        album_prices: &[("30P", 0)],
        location_surcharge: &[("창원", 50_000), ("울산", 50_000), ("김해", 20_000), ("양산", 20_000)],
        special_rules: &[("양산 M웨딩컨벤션", 200_000)],
    },
    PricingRule {
        brand: "B 세븐스",
        base_price: 160_000,
        album_prices: &[("30P", 0), ("40P", 40_000)],
        location_surcharge: &[("창원", 50_000), ("울산", 50_000), ("김해", 20_000), ("양산", 20_000)],
        special_rules: &[],
    },
    PricingRule {
        brand: "세컨드플로우",
        base_price: 190_000,
        album_prices: &[("기본 40P", 0), ("50P", 50_000), ("30P", -20_000)],
        location_surcharge: &[],
        special_rules: &[
            ("아시아드", 170_000),
            ("그랜드블랑 미라벨", 210_000),
            ("그랜드블랑 카로스", 210_000),
            ("그랜드블랑 퀸덤", 210_000),
        ],
    },
    PricingRule {
        brand: "더그라피",
        base_price: 190_000,
        album_prices: &[("기본 40P", 0), ("50P", 50_000)],
        location_surcharge: &[],
        special_rules: &[
            ("그랜드블랑 미라벨", 210_000),
            ("그랜드블랑 카로스", 210_000),
            ("그랜드블랑 퀸덤", 210_000),
        ],
    },
    PricingRule {
        brand: "A 세븐스프리미엄",
        base_price: 240_000,
        album_prices: &[("40P", 0)],
        location_surcharge: &[],
        special_rules: &[],
    },
];

/// Compute the shoot price for a brand/album/venue triple.
///
/// Special-venue overrides return immediately, bypassing all other
/// computation. Otherwise: base price, plus the album delta when the tier
/// is known for the brand, plus the first matching region surcharge.
pub fn calculate_price(brand: &str, album: &str, venue: &str) -> Result<i64, PricingError> {
    let rule = PRICING_RULES
        .iter()
        .find(|r| r.brand == brand)
        .ok_or_else(|| PricingError::UnknownBrand(brand.to_string()))?;

    for (needle, price) in rule.special_rules {
        if venue.contains(needle) {
            return Ok(*price);
        }
    }

    let mut price = rule.base_price;
    if let Some((_, delta)) = rule.album_prices.iter().find(|(tier, _)| *tier == album) {
        price += delta;
    }
    if let Some((_, surcharge)) = rule
        .location_surcharge
        .iter()
        .find(|(region, _)| venue.contains(region))
    {
        price += surcharge;
    }

    Ok(price)
}

/// Map a parsed brand string onto the pricing table's brand key.
///
/// Brand lines in chat blocks carry codes ("K세븐스" from `K[세븐스]`,
/// "세컨" shorthand); the table is keyed by full brand names. Returns
/// `None` for unrecognized strings — a soft gap, not an error.
pub fn brand_key(brand: &str) -> Option<&'static str> {
    if brand.contains('K') && brand.contains("세븐스") {
        Some("K 세븐스")
    } else if brand.contains('B') && brand.contains("세븐스") {
        Some("B 세븐스")
    } else if brand.contains('A') && brand.contains("세븐스") {
        Some("A 세븐스프리미엄")
    } else if brand.contains("세컨") {
        Some("세컨드플로우")
    } else if brand.contains("그라피") {
        Some("더그라피")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_plus_surcharge() {
        // 140,000 base + 0 album + 50,000 region
        assert_eq!(
            calculate_price("K 세븐스", "30P", "창원 그랜드웨딩홀").unwrap(),
            190_000
        );
    }

    #[test]
    fn test_album_delta() {
        assert_eq!(calculate_price("B 세븐스", "40P", "서울 웨딩홀").unwrap(), 200_000);
        assert_eq!(
            calculate_price("세컨드플로우", "30P", "서울 웨딩홀").unwrap(),
            170_000
        );
    }

    #[test]
    fn test_unknown_album_adds_nothing() {
        assert_eq!(
            calculate_price("세컨드플로우", "60P", "부산 웨딩홀").unwrap(),
            190_000
        );
    }

    #[test]
    fn test_special_venue_override_bypasses_arithmetic() {
        // The 아시아드 substring rule replaces the whole computation.
        assert_eq!(
            calculate_price("세컨드플로우", "30P", "강남 아시아드 웨딩홀").unwrap(),
            170_000
        );
        assert_eq!(
            calculate_price("세컨드플로우", "50P", "아시아드").unwrap(),
            170_000
        );
    }

    #[test]
    fn test_override_declaration_order() {
        assert_eq!(
            calculate_price("더그라피", "50P", "그랜드블랑 카로스홀").unwrap(),
            210_000
        );
    }

    #[test]
    fn test_unknown_brand_is_an_error() {
        assert!(matches!(
            calculate_price("없는브랜드", "30P", "라움"),
            Err(PricingError::UnknownBrand(_))
        ));
    }

    #[test]
    fn test_brand_key_mapping() {
        assert_eq!(brand_key("K세븐스"), Some("K 세븐스"));
        assert_eq!(brand_key("B세븐스"), Some("B 세븐스"));
        assert_eq!(brand_key("A세븐스프리미엄"), Some("A 세븐스프리미엄"));
        assert_eq!(brand_key("세컨드플로우"), Some("세컨드플로우"));
        assert_eq!(brand_key("더그라피"), Some("더그라피"));
        assert_eq!(brand_key("알수없음"), None);
    }
}
