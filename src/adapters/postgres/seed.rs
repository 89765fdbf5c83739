//! Demo data seed: the 2018 surgical patient-safety checklist.
//!
//! Idempotent: the checklist is looked up by label and only created when
//! absent, so the seed can run on every start.

use once_cell::sync::Lazy;
use sqlx::PgPool;
use tracing::info;

use crate::domain::checklist::AnswerKind;
use crate::domain::foundation::DomainError;
use crate::ports::{ChecklistRepository, NewChecklist, NewQuestion, NewStep};

use super::PostgresChecklistRepository;

const DEMO_LABEL: &str = "CHECK-LIST « SÉCURITÉ DU PATIENT AU BLOC OPÉRATOIRE »";

fn question(text: &str, kind: AnswerKind, required: bool) -> NewQuestion {
    NewQuestion {
        text: text.to_owned(),
        kind,
        required,
        options: Vec::new(),
    }
}

static DEMO_CHECKLIST: Lazy<NewChecklist> = Lazy::new(|| NewChecklist {
    label: DEMO_LABEL.to_owned(),
    version: "2018".to_owned(),
    description: "Vérifier ensemble pour décider".to_owned(),
    steps: vec![
        NewStep {
            name: "AVANT INDUCTION ANESTHÉSIQUE - Temps de pause avant anesthésie".to_owned(),
            questions: vec![
                question(
                    "L'identité du patient est correcte",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "L'autorisation d'opérer est signée par les parents ou le représentant légal",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "L'intervention et le site opératoire sont confirmés : idéalement par le patient et, dans tous les cas, par le dossier ou procédure spécifique - la documentation clinique et sans clinique nécessaire est disponible en salle",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "Le mode d'installation est connu de l'équipe en salle, cohérent avec le site / l'intervention et non dangereux pour le patient",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "La préparation cutanée de l'opéré est documentée dans la fiche de liaison service / bloc opératoire (ou autre procédure en œuvre dans l'établissement)",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "L'équipement / le matériel nécessaires pour l'intervention sont vérifiés et adaptés au poids et à la taille du patient - pour la partie chirurgicale - pour la partie anesthésique",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "Le patient présente-t-il un : - risque allergique - risque d'inhalation, de difficulté d'intubation ou de ventilation au masque - risque de saignement important",
                    AnswerKind::BooleanNa,
                    false,
                ),
            ],
        },
        NewStep {
            name: "AVANT INTERVENTION CHIRURGICALE - Temps de pause avant incision (appelé aussi time-out)".to_owned(),
            questions: vec![
                question(
                    "Vérification « ultime » réalisée au sein de l'équipe en présence des chirurgiens(s), anesthésiste(s), IADE-BODEF/IDE - identité patient confirmée - intervention prévue confirmée - site opératoire confirmé - installation correcte confirmée - documents nécessaires disponibles (notamment imagerie)",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "Partage des informations essentielles oralement au sein de l'équipe sur les éléments à risque / étapes critiques de l'intervention (time-out) - sur le plan chirurgical - (temps opératoire difficile, points spécifiques de l'opération, identification des matériels nécessaires, confirmation de leur opérationnalité, etc.) - sur le plan anesthésique",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "L'antibiothérapie a été effectuée selon les recommandations et protocoles en vigueur dans l'établissement",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "La préparation du champ opératoire est réalisée selon le protocole en vigueur dans l'établissement",
                    AnswerKind::Boolean,
                    true,
                ),
            ],
        },
        NewStep {
            name: "APRÈS INTERVENTION - Pause avant sortie de salle d'opération".to_owned(),
            questions: vec![
                question(
                    "Confirmation orale par le personnel auprès de l'équipe : - de l'intervention réalisée - du compte final correct - des compresses, aiguilles, instruments, etc. - de l'étiquetage des prélèvements, pièces opératoires, etc. - si des événements indésirables ou porteurs de risques médicaux sont survenus : ont-ils fait l'objet d'un signalement / déclaration ?",
                    AnswerKind::Boolean,
                    true,
                ),
                question(
                    "Les prescriptions et la surveillance post-opératoires (y compris les seuils d'alerte spécifiques) sont faites complètement par l'équipe chirurgicale et anesthésique et adaptées à l'âge, au poids et à la taille du patient",
                    AnswerKind::Boolean,
                    true,
                ),
            ],
        },
    ],
});

/// Creates the demo checklist when no checklist with its label exists yet.
pub async fn seed_demo_checklist(pool: &PgPool) -> Result<(), DomainError> {
    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM checklists WHERE label = $1")
            .bind(DEMO_LABEL)
            .fetch_optional(pool)
            .await
            .map_err(|e| super::db_err("check demo checklist", e))?;

    if let Some((id,)) = existing {
        info!(checklist_id = id, "demo checklist already present, skipping seed");
        return Ok(());
    }

    let repository = PostgresChecklistRepository::new(pool.clone());
    let created = repository.create(&DEMO_CHECKLIST).await?;
    info!(
        checklist_id = %created.id,
        steps = created.steps.len(),
        questions = created.question_count(),
        "demo checklist seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_checklist_matches_the_2018_form() {
        let demo = &*DEMO_CHECKLIST;
        assert_eq!(demo.version, "2018");
        assert_eq!(demo.steps.len(), 3);
        let counts: Vec<usize> = demo.steps.iter().map(|s| s.questions.len()).collect();
        assert_eq!(counts, vec![7, 4, 2]);
    }

    #[test]
    fn only_the_risk_question_allows_not_applicable() {
        let na_questions: Vec<&NewQuestion> = DEMO_CHECKLIST
            .steps
            .iter()
            .flat_map(|s| &s.questions)
            .filter(|q| q.kind == AnswerKind::BooleanNa)
            .collect();
        assert_eq!(na_questions.len(), 1);
        assert!(!na_questions[0].required);
    }
}
