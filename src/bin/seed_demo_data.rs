// ABOUTME: Seeds the exercise and recipe libraries with demo reference rows
// ABOUTME: Run once against a fresh database so the list pages render content
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Demo Data Seeder
//!
//! Populates the global `exercises` and `recipes` tables. Safe to run against
//! an existing database: rows are keyed by fresh UUIDs, so rerunning adds
//! duplicates rather than failing — intended for development databases only.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use ritmo_server::{
    config::ServerConfig,
    database::Database,
    logging,
    models::{DifficultyLevel, Exercise, ModuleType, Recipe},
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "seed-demo-data")]
#[command(about = "Seed the Meu Ritmo exercise and recipe libraries with demo data")]
struct Args {
    /// Database URL override (defaults to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

fn demo_exercises() -> Vec<Exercise> {
    let now = Utc::now();
    let base = Exercise {
        id: Uuid::new_v4(),
        title: String::new(),
        description: None,
        instructions: None,
        benefits: None,
        contraindications: None,
        observations: None,
        module_type: ModuleType::Home,
        difficulty_level: DifficultyLevel::Beginner,
        duration: None,
        calories_burned: None,
        youtube_url: None,
        image_urls: Vec::new(),
        muscle_groups: Vec::new(),
        equipment_needed: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    vec![
        Exercise {
            id: Uuid::new_v4(),
            title: "Agachamento Livre".to_owned(),
            description: Some("Agachamento com o peso do corpo, ideal para iniciantes.".to_owned()),
            instructions: Some(
                "Pés na largura dos ombros, desça até as coxas ficarem paralelas ao chão e suba controlando o movimento.".to_owned(),
            ),
            benefits: Some("Fortalece pernas e glúteos sem equipamento.".to_owned()),
            module_type: ModuleType::Home,
            difficulty_level: DifficultyLevel::Beginner,
            duration: Some(10),
            calories_burned: Some(80),
            muscle_groups: vec!["Quadríceps".to_owned(), "Glúteos".to_owned()],
            ..base.clone()
        },
        Exercise {
            id: Uuid::new_v4(),
            title: "Prancha Abdominal".to_owned(),
            description: Some("Isometria para o core, sem impacto.".to_owned()),
            instructions: Some(
                "Apoie antebraços e pontas dos pés no chão, mantenha o corpo alinhado e o abdômen contraído.".to_owned(),
            ),
            contraindications: Some("Evite em caso de dor lombar aguda.".to_owned()),
            module_type: ModuleType::Home,
            difficulty_level: DifficultyLevel::Beginner,
            duration: Some(5),
            calories_burned: Some(30),
            muscle_groups: vec!["Core".to_owned(), "Ombros".to_owned()],
            ..base.clone()
        },
        Exercise {
            id: Uuid::new_v4(),
            title: "Supino Reto com Barra".to_owned(),
            description: Some("Exercício composto para peitoral na academia.".to_owned()),
            instructions: Some(
                "Deite no banco, desça a barra até o peito e empurre até estender os braços.".to_owned(),
            ),
            observations: Some("Use um parceiro para dar segurança em cargas altas.".to_owned()),
            module_type: ModuleType::Advanced,
            difficulty_level: DifficultyLevel::Intermediate,
            duration: Some(15),
            calories_burned: Some(120),
            muscle_groups: vec!["Peitoral".to_owned(), "Tríceps".to_owned()],
            equipment_needed: vec!["Barra".to_owned(), "Banco".to_owned()],
            ..base.clone()
        },
        Exercise {
            id: Uuid::new_v4(),
            title: "Levantamento Terra".to_owned(),
            description: Some("Movimento composto de corpo inteiro.".to_owned()),
            instructions: Some(
                "Com a coluna neutra, segure a barra e estenda quadril e joelhos ao mesmo tempo.".to_owned(),
            ),
            contraindications: Some("Exige técnica; procure orientação profissional.".to_owned()),
            module_type: ModuleType::Advanced,
            difficulty_level: DifficultyLevel::Advanced,
            duration: Some(20),
            calories_burned: Some(180),
            muscle_groups: vec![
                "Posterior de coxa".to_owned(),
                "Glúteos".to_owned(),
                "Lombar".to_owned(),
            ],
            equipment_needed: vec!["Barra".to_owned(), "Anilhas".to_owned()],
            ..base
        },
    ]
}

fn demo_recipes() -> Vec<Recipe> {
    let now = Utc::now();
    let base = Recipe {
        id: Uuid::new_v4(),
        title: String::new(),
        description: None,
        ingredients: Vec::new(),
        instructions: Vec::new(),
        prep_time: None,
        cook_time: None,
        servings: None,
        calories_per_serving: None,
        goal_category: None,
        diet_type: None,
        difficulty: None,
        image_url: None,
        nutritional_info: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        Recipe {
            id: Uuid::new_v4(),
            title: "Salada de Quinoa com Legumes".to_owned(),
            description: Some("Refeição leve, rica em proteína vegetal.".to_owned()),
            ingredients: vec![
                "1 xícara de quinoa".to_owned(),
                "1 tomate picado".to_owned(),
                "1 pepino em cubos".to_owned(),
                "Azeite e limão a gosto".to_owned(),
            ],
            instructions: vec![
                "Cozinhe a quinoa e deixe esfriar.".to_owned(),
                "Misture os legumes e tempere.".to_owned(),
            ],
            prep_time: Some(15),
            cook_time: Some(15),
            servings: Some(2),
            calories_per_serving: Some(320),
            goal_category: Some("lose_weight".to_owned()),
            diet_type: Some("vegetarian".to_owned()),
            difficulty: Some("easy".to_owned()),
            ..base.clone()
        },
        Recipe {
            id: Uuid::new_v4(),
            title: "Frango Grelhado com Batata Doce".to_owned(),
            description: Some("Clássico para ganho de massa muscular.".to_owned()),
            ingredients: vec![
                "200g de peito de frango".to_owned(),
                "1 batata doce média".to_owned(),
                "Alho, sal e ervas".to_owned(),
            ],
            instructions: vec![
                "Tempere e grelhe o frango.".to_owned(),
                "Asse a batata doce até ficar macia.".to_owned(),
            ],
            prep_time: Some(10),
            cook_time: Some(30),
            servings: Some(1),
            calories_per_serving: Some(450),
            goal_category: Some("gain_muscle".to_owned()),
            difficulty: Some("easy".to_owned()),
            ..base.clone()
        },
        Recipe {
            id: Uuid::new_v4(),
            title: "Omelete de Espinafre".to_owned(),
            description: Some("Café da manhã proteico e rápido.".to_owned()),
            ingredients: vec![
                "3 ovos".to_owned(),
                "1 punhado de espinafre".to_owned(),
                "Queijo branco a gosto".to_owned(),
            ],
            instructions: vec![
                "Bata os ovos, junte o espinafre e leve à frigideira.".to_owned(),
            ],
            prep_time: Some(5),
            cook_time: Some(10),
            servings: Some(1),
            calories_per_serving: Some(280),
            goal_category: Some("maintain".to_owned()),
            diet_type: Some("low_carb".to_owned()),
            difficulty: Some("easy".to_owned()),
            ..base
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = ServerConfig::from_env()?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database_url.to_connection_string());

    let database = Database::new(&database_url).await?;

    let exercises = demo_exercises();
    for exercise in &exercises {
        database.insert_exercise(exercise).await?;
    }
    info!(count = exercises.len(), "Seeded exercises");

    let recipes = demo_recipes();
    for recipe in &recipes {
        database.insert_recipe(recipe).await?;
    }
    info!(count = recipes.len(), "Seeded recipes");

    Ok(())
}
