use crate::cli::chat::parse::parse_query;

/// Duration partition derived from the midpoint of the requested day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Short,
    Mid,
    Long,
}

fn bucket_for(mid_days: u64) -> Bucket {
    if mid_days <= 5 {
        Bucket::Short
    } else if mid_days <= 10 {
        Bucket::Mid
    } else {
        Bucket::Long
    }
}

/// A pre-authored route recommendation. Reference data, never mutated.
struct Route {
    name: &'static str,
    detail: &'static str,
    highlights: Option<&'static str>,
    season: Option<&'static str>,
}

const ROUTES_SHORT: [Route; 3] = [
    Route {
        name: "🏔️ 푼힐(Poon Hill) 트레킹",
        detail: "⏱️ 3~5일 · 난이도 🟢 쉬움~🟡 보통 · ⛰️ 최대 약 3,200m",
        highlights: Some("✨ 하이라이트: 안나푸르나/다울라기리 일출 파노라마, 깐드룩 마을"),
        season: Some("📅 시즌/퍼밋: 3~5월, 10~11월 우수 · 🎫 ACAP/TIMS 필요"),
    },
    Route {
        name: "🏔️ 마르디 히말(Mardi Himal) 단축 코스",
        detail: "⏱️ 4~6일 · 난이도 🟡 보통 · 🌄 릿지 뷰포인트",
        highlights: Some("✨ 하이라이트: 포카라 근접, 날씨 좋을 때 능선 조망 탁월"),
        season: None,
    },
    Route {
        name: "🏔️ 랑탕 밸리(Langtang) 단축",
        detail: "⏱️ 5~7일 · 난이도 🟡 보통 · 🏛️ 카얀진 곰파/전망대",
        highlights: None,
        season: None,
    },
];

const ROUTES_MID: [Route; 3] = [
    Route {
        name: "🏔️ 랑탕 밸리(Langtang) + 카얀진 뷰포인트",
        detail: "⏱️ 6~9일 · 난이도 🟡 보통 · ⛰️ 최대 4,000m대 적응 유의",
        highlights: Some("✨ 하이라이트: 카얀진 리(Kyanjin Ri), 야생 풍광, 접근성 우수"),
        season: None,
    },
    Route {
        name: "🏔️ 안나푸르나 베이스캠프(ABC)",
        detail: "⏱️ 7~10일 · 난이도 🟡 보통 · ⛰️ 고도 4,130m, 🌅 일출/설산 대장관",
        highlights: None,
        season: Some("📅 시즌/퍼밋: 성수기 혼잡, 🎫 ACAP/TIMS 필요"),
    },
    Route {
        name: "🏔️ 에베레스트 지역 고쿄 호수(Gokyo) 입문",
        detail: "⏱️ 8~10일 · 난이도 🟡 보통~🔴 어려움 · 🏔️ 고쿄리 전망",
        highlights: None,
        season: None,
    },
];

const ROUTES_LONG: [Route; 3] = [
    Route {
        name: "🏔️ 에베레스트 베이스캠프(EBC) 또는 고쿄+초라패스",
        detail: "⏱️ 12~14+일 · 난이도 🔴 어려움 · ⛰️ 고도 적응 필수, 최대 5,000m+",
        highlights: Some("✨ 하이라이트: 에베레스트 마시프, 카라파타르, 🧊 빙하/호수"),
        season: None,
    },
    Route {
        name: "🏔️ 안나푸르나 서킷(Thorong La)",
        detail: "⏱️ 12~16일 · 난이도 🟡 보통~🔴 어려움 · ⛰️ 5,416m 패스, 풍경 다양",
        highlights: None,
        season: None,
    },
    Route {
        name: "🏔️ 마나슬루(Manaslu) 또는 어퍼 무스탕(Upper Mustang)",
        detail: "⏱️ 12~16일 · 난이도 🔴 어려움 · 🎫 제한구역 퍼밋/가이드 필수",
        highlights: None,
        season: None,
    },
];

const TIPS: [&str; 4] = [
    "💡 추가 팁:",
    "   📅 최적 시즌: 보통 3~5월, 10~11월",
    "   🎫 퍼밋: 지역별 ACAP/TIMS 혹은 제한구역 퍼밋 필요",
    "   ⛰️ 고도 적응: 3,000m 이상은 천천히 상승, 💧 수분/휴식 유지",
];

/// Rule-based recommendation used when no API key is configured. Pure and
/// deterministic: parses the query, resolves defaults (5~7일 when nothing was
/// specified), buckets on the midpoint of the range and renders the matching
/// itinerary bundle.
pub fn local_recommend(query: &str) -> String {
    let parsed = parse_query(query);
    let dmin = parsed.min_days.unwrap_or(5);
    let dmax = parsed.max_days.unwrap_or(match parsed.min_days {
        Some(days) => days,
        None => 7,
    });

    // div_ceil rounds the .5 midpoints up, like Math.round in the original;
    // summed in u64 so extreme day counts cannot overflow
    let bucket = bucket_for((u64::from(dmin) + u64::from(dmax)).div_ceil(2));
    let routes: &[Route] = match bucket {
        Bucket::Short => &ROUTES_SHORT,
        Bucket::Mid => &ROUTES_MID,
        Bucket::Long => &ROUTES_LONG,
    };

    let range = if dmin != dmax {
        format!("{dmin}~{dmax}")
    } else {
        dmin.to_string()
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "📋 요청 요약: 기간 {range}일, 난이도 {} {}",
        parsed.difficulty.emoji(),
        parsed.difficulty.label()
    ));
    lines.push(String::new());

    for (i, route) in routes.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(route.name.to_string());
        lines.push(format!("   {}", route.detail));
        if let Some(highlights) = route.highlights {
            lines.push(format!("   {highlights}"));
        }
        if let Some(season) = route.season {
            lines.push(format!("   {season}"));
        }
    }

    lines.push(String::new());
    lines.extend(TIPS.iter().map(|tip| tip.to_string()));

    lines.join("\n")
}
