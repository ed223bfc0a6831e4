//! Utility to store a body profile and print the resulting plan
//!
//! Usage: set_profile <weight_kg> <height_cm> <age> [gender] [activity] [goal] [tags,...]

use fitcal::models::UserProfileUpdate;
use fitcal::nutrition::{ActivityLevel, Gender, Goal, MealSlot, TrainingTags};
use fitcal::{config, db, tools};

const USAGE: &str =
    "usage: set_profile <weight_kg> <height_cm> <age> [gender] [activity] [goal] [tags,...]";

fn parse_update(args: &[String]) -> Result<UserProfileUpdate, String> {
    if args.len() < 3 {
        return Err(USAGE.to_string());
    }

    let weight_kg = args[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid weight: {}", args[0]))?;
    let height_cm = args[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid height: {}", args[1]))?;
    let age = args[2]
        .parse::<i64>()
        .map_err(|_| format!("invalid age: {}", args[2]))?;

    Ok(UserProfileUpdate {
        name: None,
        weight_kg: Some(weight_kg),
        height_cm: Some(height_cm),
        age: Some(age),
        gender: args.get(3).map(|s| Gender::from_str(s)),
        activity_level: args.get(4).map(|s| ActivityLevel::from_str(s)),
        goal: args.get(5).map(|s| Goal::from_str(s)),
        training_tags: args.get(6).map(|s| TrainingTags::parse(s.split(','))),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let update = parse_update(&args)?;

    let db_path = config::database_path();
    println!("Database path: {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let resp = tools::profile::set_profile(&database, update)?;
    let summary = resp.nutrition.summary;

    if let Some(issue) = &resp.nutrition.issue {
        println!("Profile incomplete: {}", issue);
    }
    println!("BMR:    {} kcal", summary.bmr);
    println!("TDEE:   {} kcal", summary.tdee);
    println!("Target: {} kcal", summary.target_calories);
    println!(
        "Macros: protein {} g, carbs {} g, fat {} g",
        summary.protein, summary.carbs, summary.fat
    );
    for slot in MealSlot::ALL {
        let meal = resp.nutrition.meal_plan.slot(slot);
        println!(
            "  {:<9} {:>5} kcal  P {:>3} g  C {:>3} g  F {:>3} g",
            slot.as_str(),
            meal.calories,
            meal.protein,
            meal.carbs,
            meal.fat
        );
    }

    Ok(())
}
