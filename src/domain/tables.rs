//! Static point tables for the global cardiovascular risk score.
//!
//! Bands are half-open `[lower, upper)`, so an integer range such as
//! "35-44" is written `band(35.0, 45.0, ..)`. The last band of each factor
//! ends where its ceiling begins.

use super::cardio::{Ceiling, Factor, FactorTable, PercentTable, PointsBand, ScoringTable};
use super::patient::Sex;

const fn band(lower: f64, upper: f64, points: i32) -> PointsBand {
    PointsBand {
        lower,
        upper,
        points,
    }
}

const fn ceiling(threshold: f64, points: i32) -> Option<Ceiling> {
    Some(Ceiling { threshold, points })
}

/// HDL bands are shared by both sexes.
const HDL: FactorTable = FactorTable {
    factor: Factor::Hdl,
    bands: &[
        band(0.0, 35.0, 2),
        band(35.0, 45.0, 1),
        band(45.0, 50.0, 0),
        band(50.0, 60.0, -1),
    ],
    ceiling: ceiling(60.0, -2),
};

pub static FEMALE: ScoringTable = ScoringTable {
    sex: Sex::Female,
    age: FactorTable {
        factor: Factor::Age,
        bands: &[
            band(30.0, 35.0, 0),
            band(35.0, 40.0, 2),
            band(40.0, 45.0, 4),
            band(45.0, 50.0, 5),
            band(50.0, 55.0, 7),
            band(55.0, 60.0, 8),
            band(60.0, 65.0, 9),
            band(65.0, 70.0, 10),
            band(70.0, 75.0, 11),
        ],
        ceiling: ceiling(75.0, 15),
    },
    hdl: HDL,
    total_cholesterol: FactorTable {
        factor: Factor::TotalCholesterol,
        bands: &[
            band(0.0, 160.0, 0),
            band(160.0, 200.0, 1),
            band(200.0, 240.0, 3),
            band(240.0, 280.0, 4),
        ],
        ceiling: ceiling(280.0, 5),
    },
    sbp_untreated: FactorTable {
        factor: Factor::SystolicBp,
        bands: &[
            band(0.0, 120.0, -3),
            band(120.0, 130.0, 0),
            band(130.0, 140.0, 1),
            band(140.0, 150.0, 2),
            band(150.0, 160.0, 4),
        ],
        ceiling: ceiling(160.0, 5),
    },
    sbp_treated: FactorTable {
        factor: Factor::SystolicBp,
        bands: &[
            band(0.0, 120.0, -1),
            band(120.0, 130.0, 2),
            band(130.0, 140.0, 3),
            band(140.0, 150.0, 5),
            band(150.0, 160.0, 6),
        ],
        ceiling: ceiling(160.0, 7),
    },
    smoker_points: 3,
    diabetic_points: 4,
    percentages: PercentTable {
        floor_score: -2,
        ceiling_score: 21,
        entries: &[
            (-1, 1.0),
            (0, 1.2),
            (1, 1.5),
            (2, 1.7),
            (3, 2.0),
            (4, 2.4),
            (5, 2.8),
            (6, 3.3),
            (7, 3.9),
            (8, 4.5),
            (9, 5.3),
            (10, 6.3),
            (11, 7.3),
            (12, 8.6),
            (13, 10.0),
            (14, 11.7),
            (15, 13.7),
            (16, 15.9),
            (17, 18.5),
            (18, 21.5),
            (19, 24.8),
            (20, 27.5),
        ],
    },
};

pub static MALE: ScoringTable = ScoringTable {
    sex: Sex::Male,
    age: FactorTable {
        factor: Factor::Age,
        bands: &[
            band(30.0, 35.0, 0),
            band(35.0, 40.0, 2),
            band(40.0, 45.0, 5),
            band(45.0, 50.0, 6),
            band(50.0, 55.0, 8),
            band(55.0, 60.0, 10),
            band(60.0, 65.0, 11),
            band(65.0, 70.0, 12),
            band(70.0, 75.0, 14),
        ],
        ceiling: ceiling(75.0, 15),
    },
    hdl: HDL,
    total_cholesterol: FactorTable {
        factor: Factor::TotalCholesterol,
        bands: &[
            band(0.0, 160.0, 0),
            band(160.0, 200.0, 1),
            band(200.0, 240.0, 2),
            band(240.0, 280.0, 3),
        ],
        ceiling: ceiling(280.0, 4),
    },
    sbp_untreated: FactorTable {
        factor: Factor::SystolicBp,
        bands: &[
            band(0.0, 120.0, -2),
            band(120.0, 130.0, 0),
            band(130.0, 140.0, 1),
            band(140.0, 160.0, 2),
        ],
        ceiling: ceiling(160.0, 3),
    },
    sbp_treated: FactorTable {
        factor: Factor::SystolicBp,
        bands: &[
            band(0.0, 120.0, 0),
            band(120.0, 130.0, 2),
            band(130.0, 140.0, 3),
            band(140.0, 160.0, 4),
        ],
        ceiling: ceiling(160.0, 5),
    },
    smoker_points: 4,
    diabetic_points: 3,
    percentages: PercentTable {
        floor_score: -3,
        ceiling_score: 18,
        entries: &[
            (-2, 1.1),
            (-1, 1.4),
            (0, 1.6),
            (1, 1.9),
            (2, 2.3),
            (3, 2.8),
            (4, 3.3),
            (5, 3.9),
            (6, 4.7),
            (7, 5.6),
            (8, 6.7),
            (9, 7.9),
            (10, 9.4),
            (11, 11.2),
            (12, 13.2),
            (13, 15.6),
            (14, 18.4),
            (15, 21.6),
            (16, 25.3),
            (17, 29.4),
        ],
    },
};
