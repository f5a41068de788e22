use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LuckyRegion {
    pub id: &'static str,
    pub name: &'static str,
    pub label: &'static str,
}

const fn region(id: &'static str, name: &'static str, label: &'static str) -> LuckyRegion {
    LuckyRegion { id, name, label }
}

/// Destinations offered by the "pick for me" draw: four well-known hot
/// spots and a dozen quiet countryside towns.
pub const LUCKY_REGIONS: [LuckyRegion; 16] = [
    region("seoul-ss", "성수동", "서울 핫플"),
    region("busan-hu", "해운대", "부산 핫플"),
    region("jeju-aw", "애월", "제주 핫플"),
    region("gyeongju-hw", "황리단길", "경주 핫플"),
    region("cheongyang", "청양군", "충남 고추마을"),
    region("goesan", "괴산군", "충북 산골"),
    region("bonghwa", "봉화군", "경북 춘양면"),
    region("jangseong", "장성군", "전남 시골"),
    region("haman", "함안군", "경남 시골"),
    region("inje", "인제군", "강원 원통"),
    region("gonjiam", "곤지암", "경기 광주"),
    region("uiseong", "의성군", "경북 마을"),
    region("jindo", "진도", "전남 섬마을"),
    region("namhae", "남해군", "경남 보물섬"),
    region("boseong", "보성군", "전남 녹차밭"),
    region("sanchung", "산청군", "경남 산골"),
];

pub fn pick_lucky_region<R: Rng + ?Sized>(rng: &mut R) -> Option<LuckyRegion> {
    LUCKY_REGIONS.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_table_ids_are_unique() {
        let ids: HashSet<&str> = LUCKY_REGIONS.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), LUCKY_REGIONS.len());
    }

    #[test]
    fn test_pick_comes_from_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = pick_lucky_region(&mut rng).unwrap();
            assert!(LUCKY_REGIONS.contains(&picked));
        }
    }
}
