//! Seeds the read-only catalog. The API never writes to these tables.

use sea_orm_migration::prelude::*;

use crate::m20250301_000000_init::{People, Planets, Vehicles};

#[derive(DeriveMigrationName)]
pub struct Migration;

// (name, birth_year, gender, height, skin_color, hair_color)
const PEOPLE: &[(&str, f64, &str, &str, &str, &str)] = &[
    ("Luke Skywalker", 19.0, "male", "172", "fair", "blond"),
    ("Leia Organa", 19.0, "female", "150", "light", "brown"),
    ("Han Solo", 29.0, "male", "180", "fair", "brown"),
    ("Obi-Wan Kenobi", 57.0, "male", "182", "fair", "auburn, white"),
    ("Darth Vader", 41.9, "male", "202", "white", "none"),
];

// (name, climate, population, orbital_period, rotation_period, diameter)
const PLANETS: &[(&str, &str, i64, i32, i32, i32)] = &[
    ("Tatooine", "arid", 200_000, 304, 23, 10_465),
    ("Alderaan", "temperate", 2_000_000_000, 364, 24, 12_500),
    ("Hoth", "frozen", 0, 549, 23, 7_200),
    ("Dagobah", "murky", 0, 341, 23, 8_900),
    ("Naboo", "temperate", 4_500_000_000, 312, 26, 12_120),
];

// (name, vehicle_class, length, crew, max_atmosphering_speed, cargo_capacity)
const VEHICLES: &[(&str, &str, f64, i32, i32, i32)] = &[
    ("Sand Crawler", "wheeled", 36.8, 46, 30, 50_000),
    ("T-16 skyhopper", "repulsorcraft", 10.4, 1, 1_200, 50),
    ("X-34 landspeeder", "repulsorcraft", 3.4, 1, 250, 5),
    ("TIE/LN starfighter", "starfighter", 6.4, 1, 1_200, 65),
    ("Snowspeeder", "airspeeder", 4.5, 2, 650, 10),
];

fn build_err(err: impl std::fmt::Display) -> DbErr {
    DbErr::Migration(format!("failed to build seed statement: {err}"))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut people = Query::insert();
        people.into_table(People::Table).columns([
            People::Name,
            People::BirthYear,
            People::Gender,
            People::Height,
            People::SkinColor,
            People::HairColor,
        ]);
        for &(name, birth_year, gender, height, skin, hair) in PEOPLE {
            people
                .values([
                    name.into(),
                    birth_year.into(),
                    gender.into(),
                    height.into(),
                    skin.into(),
                    hair.into(),
                ])
                .map_err(build_err)?;
        }
        manager.exec_stmt(people).await?;

        let mut planets = Query::insert();
        planets.into_table(Planets::Table).columns([
            Planets::Name,
            Planets::Climate,
            Planets::Population,
            Planets::OrbitalPeriod,
            Planets::RotationPeriod,
            Planets::Diameter,
        ]);
        for &(name, climate, population, orbital, rotation, diameter) in PLANETS {
            planets
                .values([
                    name.into(),
                    climate.into(),
                    population.into(),
                    orbital.into(),
                    rotation.into(),
                    diameter.into(),
                ])
                .map_err(build_err)?;
        }
        manager.exec_stmt(planets).await?;

        let mut vehicles = Query::insert();
        vehicles.into_table(Vehicles::Table).columns([
            Vehicles::Name,
            Vehicles::VehicleClass,
            Vehicles::Length,
            Vehicles::Crew,
            Vehicles::MaxAtmospheringSpeed,
            Vehicles::CargoCapacity,
        ]);
        for &(name, class, length, crew, speed, cargo) in VEHICLES {
            vehicles
                .values([
                    name.into(),
                    class.into(),
                    length.into(),
                    crew.into(),
                    speed.into(),
                    cargo.into(),
                ])
                .map_err(build_err)?;
        }
        manager.exec_stmt(vehicles).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Vehicles::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Planets::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(People::Table).to_owned())
            .await?;
        Ok(())
    }
}
