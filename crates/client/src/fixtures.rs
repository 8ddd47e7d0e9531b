//! Seed data for the in-memory backend.

use roster_core::models::personnel::Personnel;
use roster_core::models::task::{Priority, Task, TaskStatus};
use roster_core::types::DbId;

/// (id, nom, prenom, poste, departement, created day in January 2023)
const PERSONNEL: &[(DbId, &str, &str, &str, &str, u32)] = &[
    (1, "Dubois", "Jean", "Développeur Frontend", "Informatique", 15),
    (2, "Martin", "Sophie", "Designer UI/UX", "Design", 16),
    (3, "Petit", "Thomas", "Développeur Backend", "Informatique", 17),
    (4, "Leroy", "Emma", "Chef de Projet", "Gestion de Projet", 18),
    (5, "Moreau", "Lucas", "Administrateur Système", "Infrastructure", 19),
];

struct TaskSeed {
    id: DbId,
    title: &'static str,
    description: &'static str,
    due: &'static str,
    priority: Priority,
    status: TaskStatus,
    completed: bool,
    personnel_id: DbId,
    created: &'static str,
}

const TASKS: &[TaskSeed] = &[
    TaskSeed {
        id: 1,
        title: "Concevoir la maquette du site web",
        description: "Créer les maquettes des pages principales du site web en utilisant Figma",
        due: "2023-06-15T00:00:00Z",
        priority: Priority::High,
        status: TaskStatus::Done,
        completed: true,
        personnel_id: 2,
        created: "2023-05-20T10:00:00Z",
    },
    TaskSeed {
        id: 2,
        title: "Développer la page d'accueil",
        description: "Implémenter la page d'accueil selon les maquettes validées",
        due: "2023-06-20T00:00:00Z",
        priority: Priority::High,
        status: TaskStatus::InProgress,
        completed: false,
        personnel_id: 1,
        created: "2023-05-25T10:00:00Z",
    },
    TaskSeed {
        id: 3,
        title: "Configurer la base de données",
        description: "Mettre en place le schéma de la base de données et créer les tables nécessaires",
        due: "2023-06-10T00:00:00Z",
        priority: Priority::High,
        status: TaskStatus::Done,
        completed: true,
        personnel_id: 3,
        created: "2023-05-15T10:00:00Z",
    },
    TaskSeed {
        id: 4,
        title: "Planifier la réunion de lancement",
        description: "Organiser la réunion de lancement du projet avec toutes les parties prenantes",
        due: "2023-05-30T00:00:00Z",
        priority: Priority::Medium,
        status: TaskStatus::Done,
        completed: true,
        personnel_id: 4,
        created: "2023-05-10T10:00:00Z",
    },
    TaskSeed {
        id: 5,
        title: "Configurer l'environnement de développement",
        description: "Mettre en place les serveurs de développement et de test",
        due: "2023-06-05T00:00:00Z",
        priority: Priority::Medium,
        status: TaskStatus::Done,
        completed: true,
        personnel_id: 5,
        created: "2023-05-12T10:00:00Z",
    },
    TaskSeed {
        id: 6,
        title: "Développer l'API REST",
        description: "Créer les endpoints de l'API pour les fonctionnalités principales",
        due: "2023-06-25T00:00:00Z",
        priority: Priority::High,
        status: TaskStatus::InProgress,
        completed: false,
        personnel_id: 3,
        created: "2023-06-01T10:00:00Z",
    },
    TaskSeed {
        id: 7,
        title: "Intégrer les formulaires",
        description: "Implémenter les formulaires d'inscription et de connexion",
        due: "2023-06-22T00:00:00Z",
        priority: Priority::Medium,
        status: TaskStatus::Todo,
        completed: false,
        personnel_id: 1,
        created: "2023-06-05T10:00:00Z",
    },
    TaskSeed {
        id: 8,
        title: "Créer les icônes et assets graphiques",
        description: "Concevoir et exporter les icônes et autres éléments graphiques nécessaires",
        due: "2023-06-18T00:00:00Z",
        priority: Priority::Low,
        status: TaskStatus::Todo,
        completed: false,
        personnel_id: 2,
        created: "2023-06-08T10:00:00Z",
    },
    TaskSeed {
        id: 9,
        title: "Préparer la documentation technique",
        description: "Rédiger la documentation technique pour les développeurs",
        due: "2023-07-05T00:00:00Z",
        priority: Priority::Low,
        status: TaskStatus::Todo,
        completed: false,
        personnel_id: 4,
        created: "2023-06-10T10:00:00Z",
    },
    TaskSeed {
        id: 10,
        title: "Mettre en place le monitoring",
        description: "Configurer les outils de monitoring et d'alerte",
        due: "2023-06-30T00:00:00Z",
        priority: Priority::Medium,
        status: TaskStatus::Todo,
        completed: false,
        personnel_id: 5,
        created: "2023-06-12T10:00:00Z",
    },
];

pub fn personnel() -> Vec<Personnel> {
    PERSONNEL
        .iter()
        .enumerate()
        .map(|(i, &(id, nom, prenom, poste, departement, day))| {
            let stamp = format!("2023-01-{day:02}T10:00:00Z");
            Personnel {
                id: Some(id),
                family_name: nom.to_string(),
                given_name: prenom.to_string(),
                email: format!("{}.{}@example.com", prenom, nom).to_lowercase(),
                phone: Some(format!("01234567{}", 89 + i)),
                job_title: Some(poste.to_string()),
                department: Some(departement.to_string()),
                created_at: Some(stamp.clone()),
                updated_at: Some(stamp),
                tasks: None,
            }
        })
        .collect()
}

pub fn tasks() -> Vec<Task> {
    TASKS
        .iter()
        .map(|seed| Task {
            id: Some(seed.id),
            title: seed.title.to_string(),
            description: Some(seed.description.to_string()),
            due_date: Some(seed.due.to_string()),
            priority: Some(seed.priority),
            status: Some(seed.status),
            completed: seed.completed,
            personnel_id: seed.personnel_id,
            personnel: None,
            created_at: Some(seed.created.to_string()),
            updated_at: Some(seed.created.to_string()),
        })
        .collect()
}
