//! Fixed lookup tables keyed by canonical English gap labels.
//!
//! Every lookup matches by case-insensitive containment, in table order, so
//! labels that embed a canonical key (`"배송 이슈 (Delivery)"`,
//! `"Texture - sticky"`) still resolve. A label containing `No Gap` always
//! resolves to it; otherwise the first key found wins.

use crate::review::GapType;

const NO_GAP: &str = "No Gap";

/// Label shown for rows that carry no gap label at all.
pub const NO_INFO_LABEL: &str = "정보 없음";

/// Canonical keys and aliases used to parse gap labels, in match order.
pub(crate) const GAP_LABEL_KEYS: &[(&str, GapType)] = &[
    ("Product Performance", GapType::ProductPerformance),
    ("Product Quality", GapType::ProductQuality),
    ("Texture", GapType::Texture),
    ("Usage", GapType::Texture),
    ("Suitability", GapType::Suitability),
    ("Service", GapType::Service),
    ("Delivery", GapType::Delivery),
    ("Logistics", GapType::Delivery),
    ("Promotion", GapType::Promotion),
    ("Freebies", GapType::Promotion),
    ("No Gap", GapType::NoGap),
];

/// Korean display names per canonical gap key.
const LOCALIZED_GAP_LABELS: &[(&str, &str)] = &[
    ("Product Performance", "성능 불일치"),
    ("Product Quality", "제품 품질 이슈"),
    ("Texture", "제형·사용감 불일치"),
    ("Suitability", "피부 타입 적합성 이슈"),
    ("Service", "서비스/CS 이슈"),
    ("Delivery", "배송 이슈"),
    ("Promotion", "프로모션/사은품 문제"),
    ("No Gap", "문제 없음"),
];

/// Action guidance per canonical gap key, in match order.
const ACTION_GUIDANCE: &[(&str, &str)] = &[
    (
        "Product Performance",
        "기대 효능 수준을 구체적으로 명시하고, 전/후 사진·사용 기간·테스트 결과 등을 상세페이지 상단에 배치하세요.",
    ),
    (
        "Texture",
        "사용감(발림성/흡수/잔여감)을 피부 타입별로 솔직하게 안내하고, 적정 사용량·레이어링 팁을 함께 제안하세요.",
    ),
    (
        "Product Quality",
        "파손·누수·불량 비중이 높다면 포장 보강, 출고 전 검수 강화, 교환/환불 정책을 명확히 하세요.",
    ),
    (
        "Suitability",
        "추천 피부 타입/주의 피부 타입을 선명히 구분하고, 민감 피부 패치 테스트 정보 등 안전성 안내를 강화하세요.",
    ),
    (
        "Service",
        "CS 응답 SLA, 보상 정책, 문의 채널(챗/메일)을 FAQ 영역에 명확히 고지하세요.",
    ),
    (
        "Delivery",
        "예상 리드타임/택배사 정보를 선명히 표시하고, 지연 시 알림·보상 옵션을 검토하세요.",
    ),
    (
        "Promotion",
        "사은품/프로모션 조건을 상품명·상세 상단에 고정 노출하고, 소진 시 대체 메시지도 함께 안내하세요.",
    ),
    (
        "No Gap",
        "메시지–경험 일치도가 높습니다. 동일 톤을 유지하며 긍정 리뷰를 마케팅 자산으로 재활용하세요.",
    ),
];

fn find_by_containment<'a>(
    table: &'a [(&'a str, &'a str)],
    label: &str,
) -> Option<(&'a str, &'a str)> {
    let lower = label.to_lowercase();
    let matches = |key: &str| lower.contains(&key.to_lowercase());
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(NO_GAP) && matches(key))
        .or_else(|| table.iter().find(|(key, _)| matches(key)))
        .copied()
}

/// Korean display label with the canonical key appended, e.g.
/// `"배송 이슈 (Delivery)"`.
///
/// Missing gaps render as [`NO_INFO_LABEL`]; labels matching no key are
/// returned unchanged.
#[must_use]
pub fn localized_label(gap: Option<&GapType>) -> String {
    let Some(gap) = gap else {
        return NO_INFO_LABEL.to_string();
    };
    match find_by_containment(LOCALIZED_GAP_LABELS, gap.label()) {
        Some((key, localized)) => format!("{localized} ({key})"),
        None => gap.label().to_string(),
    }
}

/// Action guidance for an arbitrary (possibly translated) gap label.
///
/// Falls back to the Product Performance guidance when no key matches.
#[must_use]
pub fn action_for_label(label: &str) -> &'static str {
    find_by_containment(ACTION_GUIDANCE, label)
        .map_or(ACTION_GUIDANCE[0].1, |(_, action)| action)
}

#[must_use]
pub fn action_for(gap: &GapType) -> &'static str {
    action_for_label(gap.label())
}
