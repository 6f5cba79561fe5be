use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use data_character::{Character, CharacterDetail, CharacterSource};
use data_error::{CatalogError, Result};
use tokio::sync::Semaphore;

pub(crate) fn character(
    name: &str,
    house: Option<&str>,
    student: bool,
    staff: bool,
) -> Character {
    Character {
        id: String::new(),
        name: name.to_owned(),
        image: None,
        species: "human".to_owned(),
        house: house.map(str::to_owned),
        actor: None,
        wand: None,
        alive: Some(true),
        wizard: Some(true),
        hogwarts_student: student,
        hogwarts_staff: staff,
    }
    .with_derived_id()
}

/// In-memory source counting the requests it serves.
///
/// A gated source holds every request until [`FakeSource::open_gate`].
pub(crate) struct FakeSource {
    characters: Vec<Character>,
    gate: Semaphore,
    failing: AtomicBool,
    all_calls: AtomicUsize,
    students_calls: AtomicUsize,
    staff_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(characters: Vec<Character>) -> Self {
        Self::with_permits(characters, 1)
    }

    pub(crate) fn gated(characters: Vec<Character>) -> Self {
        Self::with_permits(characters, 0)
    }

    fn with_permits(characters: Vec<Character>, permits: usize) -> Self {
        Self {
            characters,
            gate: Semaphore::new(permits),
            failing: AtomicBool::new(false),
            all_calls: AtomicUsize::new(0),
            students_calls: AtomicUsize::new(0),
            staff_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn open_gate(&self) {
        self.gate.add_permits(1);
    }

    pub(crate) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn all_calls(&self) -> usize {
        self.all_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn students_calls(&self) -> usize {
        self.students_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn staff_calls(&self) -> usize {
        self.staff_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn serve(
        &self,
        counter: &AtomicUsize,
        failure: String,
    ) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|err| CatalogError::Cache(err.to_string()))?;
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::fetch(failure, 500));
        }
        Ok(())
    }

    fn filtered(&self, keep: impl Fn(&Character) -> bool) -> Vec<Character> {
        self.characters
            .iter()
            .filter(|c| keep(c))
            .cloned()
            .collect()
    }
}

impl CharacterSource for FakeSource {
    async fn all_characters(&self) -> Result<Vec<Character>> {
        self.serve(&self.all_calls, "Failed to fetch characters".into())
            .await?;
        Ok(self.characters.clone())
    }

    async fn students(&self) -> Result<Vec<Character>> {
        self.serve(&self.students_calls, "Failed to fetch students".into())
            .await?;
        Ok(self.filtered(|c| c.hogwarts_student))
    }

    async fn staff(&self) -> Result<Vec<Character>> {
        self.serve(&self.staff_calls, "Failed to fetch staff".into())
            .await?;
        Ok(self.filtered(|c| c.hogwarts_staff))
    }

    async fn character_by_id(
        &self,
        id: &str,
    ) -> Result<Option<CharacterDetail>> {
        self.serve(
            &self.detail_calls,
            format!("Failed to fetch character with id {}", id),
        )
        .await?;
        Ok(self
            .characters
            .iter()
            .find(|c| c.id == id)
            .map(|c| CharacterDetail {
                character: c.clone(),
                date_of_birth: None,
                ancestry: None,
                eye_colour: None,
                hair_colour: None,
                patronus: None,
                alternate_names: Vec::new(),
            }))
    }
}
