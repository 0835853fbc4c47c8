//! Read-only catalog endpoints.

use api_types::catalog::{PersonView, PlanetView, VehicleView};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::{Person, Planet, Vehicle};

use crate::{ServerError, server::ServerState};

pub(crate) fn person_view(person: Person) -> PersonView {
    PersonView {
        id: person.id,
        name: person.name,
        birth_year: person.birth_year,
        gender: person.gender,
        height: person.height,
        skin_color: person.skin_color,
        hair_color: person.hair_color,
    }
}

pub(crate) fn planet_view(planet: Planet) -> PlanetView {
    PlanetView {
        id: planet.id,
        name: planet.name,
        climate: planet.climate,
        population: planet.population,
        orbital_period: planet.orbital_period,
        rotation_period: planet.rotation_period,
        diameter: planet.diameter,
    }
}

pub(crate) fn vehicle_view(vehicle: Vehicle) -> VehicleView {
    VehicleView {
        id: vehicle.id,
        name: vehicle.name,
        vehicle_class: vehicle.vehicle_class,
        length: vehicle.length,
        crew: vehicle.crew,
        max_atmosphering_speed: vehicle.max_atmosphering_speed,
        cargo_capacity: vehicle.cargo_capacity,
    }
}

pub async fn people(
    State(state): State<ServerState>,
) -> Result<Json<Vec<PersonView>>, ServerError> {
    let people = state.engine.people().await?;
    Ok(Json(people.into_iter().map(person_view).collect()))
}

pub async fn person(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<PersonView>, ServerError> {
    Ok(Json(person_view(state.engine.person(id).await?)))
}

pub async fn planets(
    State(state): State<ServerState>,
) -> Result<Json<Vec<PlanetView>>, ServerError> {
    let planets = state.engine.planets().await?;
    Ok(Json(planets.into_iter().map(planet_view).collect()))
}

pub async fn planet(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<PlanetView>, ServerError> {
    Ok(Json(planet_view(state.engine.planet(id).await?)))
}

pub async fn vehicles(
    State(state): State<ServerState>,
) -> Result<Json<Vec<VehicleView>>, ServerError> {
    let vehicles = state.engine.vehicles().await?;
    Ok(Json(vehicles.into_iter().map(vehicle_view).collect()))
}

pub async fn vehicle(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<VehicleView>, ServerError> {
    Ok(Json(vehicle_view(state.engine.vehicle(id).await?)))
}
