// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use sukima_app::{JobRecord, MapPin, MapPoint, Review};
use sukima_catalog::Catalog;

const TITLES: [&str; 8] = [
    "カフェホールスタッフ",
    "コンビニ品出し",
    "倉庫内軽作業",
    "イベント設営",
    "居酒屋キッチン補助",
    "オフィス移転作業",
    "スーパーレジ応援",
    "チラシ配布",
];

const PLACES: [&str; 5] = ["渋谷", "新宿", "池袋", "品川", "目黒"];

pub fn sample_record(index: usize) -> JobRecord {
    JobRecord {
        title: TITLES[index % TITLES.len()].to_owned(),
        time: format!("{}:00〜{}:00", 9 + index % 8, 14 + index % 8),
        full_time: (index % 2 == 0).then(|| {
            format!(
                "12月{}日 {}:00〜{}:00(休憩15分)",
                1 + index % 28,
                9 + index % 8,
                14 + index % 8
            )
        }),
        place: PLACES[index % PLACES.len()].to_owned(),
        price: format!("¥{},{:03}", 4 + index % 5, (index * 137) % 1000),
        image_key: format!("{:06X}", (index * 0x1F2F3F) & 0xFF_FF_FF),
        description: (index % 3 == 0).then(|| format!("作業内容の説明 {index}")),
        notes: None,
        address: (index % 2 == 1).then(|| format!("東京都テスト区{}丁目", index + 1)),
        shop_name: (index % 2 == 1).then(|| format!("テスト店舗{index}")),
        items: if index % 2 == 0 {
            vec!["動きやすい服装".to_owned()]
        } else {
            Vec::new()
        },
        conditions: vec!["未経験歓迎".to_owned()],
        reviews: if index % 3 == 1 {
            vec![Review {
                user: format!("ワーカー{index}"),
                date: "2026/07/01".to_owned(),
                text: "また入りたい現場でした。".to_owned(),
            }]
        } else {
            Vec::new()
        },
        has_other_dates: index % 2 == 0,
        urgent: index % 4 == 0,
    }
}

pub fn sample_records(len: usize) -> Vec<JobRecord> {
    (0..len).map(sample_record).collect()
}

pub fn sample_center() -> MapPoint {
    MapPoint {
        lat: 35.658,
        lng: 139.7016,
    }
}

pub fn sample_pins(len: usize) -> Vec<MapPin> {
    (0..len)
        .map(|index| MapPin {
            lat: 35.6 + index as f64 * 0.01,
            lng: 139.7 + index as f64 * 0.01,
            title: TITLES[index % TITLES.len()].to_owned(),
        })
        .collect()
}

pub fn sample_catalog(len: usize) -> Catalog {
    Catalog::from_parts(sample_records(len), Some(sample_center()), sample_pins(len))
}

pub fn catalog_without_map(len: usize) -> Catalog {
    Catalog::from_parts(sample_records(len), None, Vec::new())
}
