#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use visitday_core::{
    models::{
        appointment::{Appointment, NewAppointment},
        program::Program,
        student::{NewStudent, Student},
        vip::{NewVip, Vip},
    },
    store::{AppointmentWriter, RosterWriter, UnitOfWork, WriteError},
};

#[derive(Debug, Default)]
pub struct StoreState {
    pub appointments: Vec<Appointment>,
    pub students: Vec<Student>,
    pub vips: Vec<Vip>,
    pub commits: usize,
    pub rollbacks: usize,
}

/// Committed rows shared by every batch opened against it
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> MemoryBatch {
        MemoryBatch {
            store: self.clone(),
            appointments: Vec::new(),
            students: Vec::new(),
            vips: Vec::new(),
            writes: 0,
            fail_on_write: None,
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }
}

/// Staged writes that only reach the store on commit
#[derive(Debug)]
pub struct MemoryBatch {
    store: MemoryStore,
    appointments: Vec<Appointment>,
    students: Vec<Student>,
    vips: Vec<Vip>,
    writes: usize,
    fail_on_write: Option<usize>,
}

impl MemoryBatch {
    /// Makes the nth write (1-based) fail as if the connection dropped
    pub fn failing_on_write(mut self, n: usize) -> Self {
        self.fail_on_write = Some(n);
        self
    }

    fn count_write(&mut self) -> Result<(), WriteError> {
        self.writes += 1;
        if self.fail_on_write == Some(self.writes) {
            return Err(WriteError::Fatal(eyre::eyre!("connection reset by peer")));
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentWriter for MemoryBatch {
    async fn insert_appointment(&mut self, new: &NewAppointment) -> Result<Appointment, WriteError> {
        self.count_write()?;

        let duplicate = {
            let state = self.store.state();
            state
                .appointments
                .iter()
                .chain(self.appointments.iter())
                .any(|a| a.vip_id == new.vip_id && a.start_time == new.start_time)
        };
        if duplicate {
            return Err(WriteError::Rejected(
                "An appointment with this VIP already starts at that time".to_string(),
            ));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            program_id: new.program_id,
            vip_id: new.vip_id,
            student_id: None,
            start_time: new.start_time,
            end_time: new.end_time,
            created_at: Utc::now(),
        };
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }
}

#[async_trait]
impl RosterWriter for MemoryBatch {
    async fn find_or_create_student(&mut self, new: &NewStudent) -> Result<Student, WriteError> {
        self.count_write()?;

        let existing = {
            let state = self.store.state();
            state
                .students
                .iter()
                .chain(self.students.iter())
                .find(|s| s.program_id == new.program_id && s.email == new.email)
                .cloned()
        };
        if let Some(student) = existing {
            return Ok(student);
        }

        let student = Student {
            id: Uuid::new_v4(),
            program_id: new.program_id,
            email: new.email.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            umid: new.umid.clone(),
            created_at: Utc::now(),
        };
        self.students.push(student.clone());
        Ok(student)
    }

    async fn find_or_create_vip(&mut self, new: &NewVip) -> Result<Vip, WriteError> {
        self.count_write()?;

        let existing = {
            let state = self.store.state();
            state
                .vips
                .iter()
                .chain(self.vips.iter())
                .find(|v| v.program_id == new.program_id && v.name == new.name)
                .cloned()
        };
        if let Some(vip) = existing {
            return Ok(vip);
        }

        let vip = Vip {
            id: Uuid::new_v4(),
            program_id: new.program_id,
            name: new.name.clone(),
            title: new.title.clone(),
            profile_url: new.profile_url.clone(),
            ranking: new.ranking,
            created_at: Utc::now(),
        };
        self.vips.push(vip.clone());
        Ok(vip)
    }
}

#[async_trait]
impl UnitOfWork for MemoryBatch {
    async fn commit(self) -> eyre::Result<()> {
        let mut state = self.store.state();
        state.appointments.extend(self.appointments);
        state.students.extend(self.students);
        state.vips.extend(self.vips);
        state.commits += 1;
        Ok(())
    }

    async fn rollback(self) -> eyre::Result<()> {
        self.store.state().rollbacks += 1;
        Ok(())
    }
}

pub fn program(length_minutes: i32, held_on_dates: Vec<NaiveDate>) -> Program {
    Program {
        id: Uuid::new_v4(),
        department_id: Uuid::new_v4(),
        name: "Graduate Visit Weekend".to_string(),
        default_appointment_length: length_minutes,
        held_on_dates,
        created_at: Utc::now(),
    }
}

pub fn vip(program: &Program) -> Vip {
    Vip {
        id: Uuid::new_v4(),
        program_id: program.id,
        name: "Prof. Grace Hopper".to_string(),
        title: Some("Professor".to_string()),
        profile_url: None,
        ranking: Some(1),
        created_at: Utc::now(),
    }
}
