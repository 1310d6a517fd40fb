//! Country lookups used to give phone numbers a dialing context.

struct Country {
    alpha2: &'static str,
    alpha3: &'static str,
    names: &'static [&'static str],
    calling_code: &'static str,
}

const fn country(
    alpha2: &'static str,
    alpha3: &'static str,
    names: &'static [&'static str],
    calling_code: &'static str,
) -> Country {
    Country {
        alpha2,
        alpha3,
        names,
        calling_code,
    }
}

const COUNTRIES: &[Country] = &[
    country("US", "USA", &["united states", "united states of america", "america"], "1"),
    country("CA", "CAN", &["canada"], "1"),
    country("PR", "PRI", &["puerto rico"], "1"),
    country("GU", "GUM", &["guam"], "1"),
    country("VI", "VIR", &["virgin islands, u.s.", "us virgin islands"], "1"),
    country("AS", "ASM", &["american samoa"], "1"),
    country("MP", "MNP", &["northern mariana islands"], "1"),
    country("JM", "JAM", &["jamaica"], "1"),
    country("DO", "DOM", &["dominican republic"], "1"),
    country("MX", "MEX", &["mexico"], "52"),
    country("GT", "GTM", &["guatemala"], "502"),
    country("SV", "SLV", &["el salvador"], "503"),
    country("HN", "HND", &["honduras"], "504"),
    country("NI", "NIC", &["nicaragua"], "505"),
    country("CR", "CRI", &["costa rica"], "506"),
    country("PA", "PAN", &["panama"], "507"),
    country("CU", "CUB", &["cuba"], "53"),
    country("HT", "HTI", &["haiti"], "509"),
    country("CO", "COL", &["colombia"], "57"),
    country("VE", "VEN", &["venezuela"], "58"),
    country("PE", "PER", &["peru"], "51"),
    country("BR", "BRA", &["brazil"], "55"),
    country("AR", "ARG", &["argentina"], "54"),
    country("CL", "CHL", &["chile"], "56"),
    country("GB", "GBR", &["united kingdom", "great britain", "uk"], "44"),
    country("IE", "IRL", &["ireland"], "353"),
    country("FR", "FRA", &["france"], "33"),
    country("DE", "DEU", &["germany"], "49"),
    country("ES", "ESP", &["spain"], "34"),
    country("PT", "PRT", &["portugal"], "351"),
    country("IT", "ITA", &["italy"], "39"),
    country("NL", "NLD", &["netherlands"], "31"),
    country("PL", "POL", &["poland"], "48"),
    country("UA", "UKR", &["ukraine"], "380"),
    country("RU", "RUS", &["russia", "russian federation"], "7"),
    country("NG", "NGA", &["nigeria"], "234"),
    country("ET", "ETH", &["ethiopia"], "251"),
    country("SO", "SOM", &["somalia"], "252"),
    country("KE", "KEN", &["kenya"], "254"),
    country("ZA", "ZAF", &["south africa"], "27"),
    country("EG", "EGY", &["egypt"], "20"),
    country("IN", "IND", &["india"], "91"),
    country("PK", "PAK", &["pakistan"], "92"),
    country("BD", "BGD", &["bangladesh"], "880"),
    country("CN", "CHN", &["china"], "86"),
    country("JP", "JPN", &["japan"], "81"),
    country("KR", "KOR", &["south korea", "korea, republic of"], "82"),
    country("VN", "VNM", &["vietnam", "viet nam"], "84"),
    country("PH", "PHL", &["philippines"], "63"),
    country("AU", "AUS", &["australia"], "61"),
    country("NZ", "NZL", &["new zealand"], "64"),
];

/// Resolves an alpha-2 code, alpha-3 code or English country name to the
/// ISO 3166-1 alpha-2 code.
pub fn country_alpha2(raw: &str) -> Option<&'static str> {
    let needle = raw.trim();
    if needle.is_empty() {
        return None;
    }
    let lowered = needle.to_lowercase();

    COUNTRIES
        .iter()
        .find(|country| {
            country.alpha2.eq_ignore_ascii_case(needle)
                || country.alpha3.eq_ignore_ascii_case(needle)
                || country.names.contains(&lowered.as_str())
        })
        .map(|country| country.alpha2)
}

/// International calling code (without `+`) for an alpha-2 country code.
pub fn calling_code(alpha2: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|country| country.alpha2.eq_ignore_ascii_case(alpha2))
        .map(|country| country.calling_code)
}
