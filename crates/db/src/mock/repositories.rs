use async_trait::async_trait;
use mockall::mock;
use visitday_core::{
    models::{
        appointment::{Appointment, NewAppointment},
        student::{NewStudent, Student},
        vip::{NewVip, Vip},
    },
    store::{AppointmentWriter, RosterWriter, UnitOfWork, WriteError},
};

// Mock batch writer for testing
mock! {
    pub Batch {}

    #[async_trait]
    impl AppointmentWriter for Batch {
        async fn insert_appointment(
            &mut self,
            appointment: &NewAppointment,
        ) -> Result<Appointment, WriteError>;
    }

    #[async_trait]
    impl RosterWriter for Batch {
        async fn find_or_create_student(
            &mut self,
            student: &NewStudent,
        ) -> Result<Student, WriteError>;

        async fn find_or_create_vip(
            &mut self,
            vip: &NewVip,
        ) -> Result<Vip, WriteError>;
    }

    #[async_trait]
    impl UnitOfWork for Batch {
        async fn commit(self) -> eyre::Result<()>;

        async fn rollback(self) -> eyre::Result<()>;
    }
}
