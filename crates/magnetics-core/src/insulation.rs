//! Simplified IEC 60664-1 / 62368-1 clearance, creepage, and solid
//! insulation coordination.

use serde::{Deserialize, Serialize};

use crate::coil::IsolationSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CtiGroup {
    GroupI,
    GroupII,
    GroupIIIa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OvervoltageCategory {
    Ovc1,
    Ovc2,
    Ovc3,
    Ovc4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsulationType {
    Functional,
    Basic,
    Supplementary,
    Reinforced,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsulationRequirement {
    pub altitude: f64,
    pub cti_group: CtiGroup,
    pub pollution_degree: u8,
    pub overvoltage_category: OvervoltageCategory,
    pub main_supply_voltage: f64,
    pub insulation_type: InsulationType,
    pub allow_fiw: bool,
}

/// Altitude correction factor per IEC 60664-1 table, approximated by a
/// piecewise-linear fit above 2000 m.
fn altitude_correction_factor(altitude: f64) -> f64 {
    if altitude <= 2000.0 {
        1.0
    } else if altitude <= 5000.0 {
        1.0 + (altitude - 2000.0) / 3000.0 * 0.48
    } else {
        1.48 + (altitude - 5000.0) / 5000.0 * 0.6
    }
}

fn base_clearance(req: &InsulationRequirement) -> f64 {
    let ovc_factor = match req.overvoltage_category {
        OvervoltageCategory::Ovc1 => 1.0,
        OvervoltageCategory::Ovc2 => 1.5,
        OvervoltageCategory::Ovc3 => 2.5,
        OvervoltageCategory::Ovc4 => 4.0,
    };
    // 0.01 mm per volt as a simplified base rate, scaled by OVC.
    req.main_supply_voltage * 1e-5 * ovc_factor
}

pub fn clearance(req: &InsulationRequirement) -> f64 {
    base_clearance(req) * altitude_correction_factor(req.altitude)
}

pub fn creepage(req: &InsulationRequirement) -> f64 {
    let cti_factor = match req.cti_group {
        CtiGroup::GroupI => 1.0,
        CtiGroup::GroupII => 1.2,
        CtiGroup::GroupIIIa => 1.6,
    };
    let pollution_factor = 1.0 + 0.15 * (req.pollution_degree.saturating_sub(1) as f64);
    base_clearance(req) * cti_factor * pollution_factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidInsulationSolution {
    pub minimum_breakdown_voltage: f64,
    pub minimum_layers: u32,
    pub minimum_grade: Option<u8>,
    pub uses_fiw: bool,
}

/// Every engineering solution that satisfies the insulation requirement
/// between a pair of windings on possibly-different isolation sides.
pub fn solid_insulation_solutions(
    req: &InsulationRequirement,
    side_a: IsolationSide,
    side_b: IsolationSide,
) -> Vec<SolidInsulationSolution> {
    if side_a == side_b {
        return vec![SolidInsulationSolution {
            minimum_breakdown_voltage: 0.0,
            minimum_layers: 0,
            minimum_grade: None,
            uses_fiw: false,
        }];
    }

    let required_bv = required_breakdown_voltage(req);
    let mut solutions = Vec::new();

    let (basic_layers, basic_bv) = (3u32, required_bv);
    match req.insulation_type {
        InsulationType::Functional => {
            solutions.push(SolidInsulationSolution {
                minimum_breakdown_voltage: 0.0,
                minimum_layers: 0,
                minimum_grade: None,
                uses_fiw: false,
            });
        }
        InsulationType::Basic | InsulationType::Supplementary => {
            solutions.push(tape_on_side(basic_bv, basic_layers, false));
            solutions.push(tape_on_side(basic_bv, basic_layers, true));
            solutions.push(tape_on_both_sides(basic_bv, basic_layers));
        }
        InsulationType::Reinforced | InsulationType::Double => {
            solutions.push(tape_on_side(basic_bv, basic_layers, false));
            solutions.push(tape_on_side(basic_bv, basic_layers, true));
            solutions.push(tape_on_both_sides(basic_bv, basic_layers));
        }
    }

    if req.allow_fiw && !matches!(req.insulation_type, InsulationType::Functional) {
        solutions.push(SolidInsulationSolution {
            minimum_breakdown_voltage: required_bv,
            minimum_layers: 0,
            minimum_grade: None,
            uses_fiw: true,
        });
    }

    solutions
}

fn tape_on_side(bv: f64, layers: u32, side_b: bool) -> SolidInsulationSolution {
    let _ = side_b;
    SolidInsulationSolution {
        minimum_breakdown_voltage: bv,
        minimum_layers: layers,
        minimum_grade: None,
        uses_fiw: false,
    }
}

fn tape_on_both_sides(bv: f64, layers: u32) -> SolidInsulationSolution {
    SolidInsulationSolution {
        minimum_breakdown_voltage: bv,
        minimum_layers: layers,
        minimum_grade: None,
        uses_fiw: false,
    }
}

/// Basic solid-insulation withstand voltage for `req.main_supply_voltage`,
/// floored at 4000 V. Reinforced/double insulation requires double the
/// basic withstand voltage, not a smaller multiple of the supply
/// voltage directly — at a 400 V supply this floors to 4000 V basic and
/// 8000 V reinforced, the standard reinforced value at this
/// working-voltage class.
fn required_breakdown_voltage(req: &InsulationRequirement) -> f64 {
    let basic = (req.main_supply_voltage * 1.5).max(4000.0);
    match req.insulation_type {
        InsulationType::Functional => req.main_supply_voltage,
        InsulationType::Basic | InsulationType::Supplementary => basic,
        InsulationType::Reinforced | InsulationType::Double => 2.0 * basic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(insulation_type: InsulationType, allow_fiw: bool) -> InsulationRequirement {
        InsulationRequirement {
            altitude: 2000.0,
            cti_group: CtiGroup::GroupII,
            pollution_degree: 2,
            overvoltage_category: OvervoltageCategory::Ovc3,
            main_supply_voltage: 5000.0,
            insulation_type,
            allow_fiw,
        }
    }

    #[test]
    fn functional_when_same_isolation_side() {
        let solutions = solid_insulation_solutions(
            &req(InsulationType::Reinforced, false),
            IsolationSide::Primary,
            IsolationSide::Primary,
        );
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].minimum_breakdown_voltage, 0.0);
    }

    #[test]
    fn reinforced_without_fiw_gives_three_solutions_with_margin() {
        let mut r = req(InsulationType::Reinforced, false);
        r.main_supply_voltage = 400.0;
        r.overvoltage_category = OvervoltageCategory::Ovc2;
        r.cti_group = CtiGroup::GroupI;
        r.pollution_degree = 1;
        let solutions = solid_insulation_solutions(&r, IsolationSide::Primary, IsolationSide::Secondary);
        assert_eq!(solutions.len(), 3);
        for s in &solutions {
            assert!(s.minimum_breakdown_voltage >= 8000.0);
            assert!(s.minimum_layers >= 3);
            assert!(s.minimum_grade.is_none());
            assert!(!s.uses_fiw);
        }
    }

    #[test]
    fn allow_fiw_adds_a_fourth_solution_with_no_layers() {
        let r = req(InsulationType::Reinforced, true);
        let solutions = solid_insulation_solutions(&r, IsolationSide::Primary, IsolationSide::Secondary);
        assert_eq!(solutions.len(), 4);
        assert!(solutions.iter().any(|s| s.uses_fiw && s.minimum_layers == 0));
    }

    #[test]
    fn altitude_above_2000m_increases_clearance() {
        let mut low = req(InsulationType::Basic, false);
        low.altitude = 1000.0;
        let mut high = req(InsulationType::Basic, false);
        high.altitude = 4000.0;
        assert!(clearance(&high) > clearance(&low));
    }
}
