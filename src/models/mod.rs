pub mod arithmetic;
pub mod enums;
pub mod exercise;
pub mod from_row;
pub mod patch;
pub mod progress;
pub mod routine;
pub mod user;
pub mod workout_session;

pub use arithmetic::{ArithmeticOperation, Calculation, Operation, OperationRequest, OperationUpdate};
pub use enums::{Difficulty, ExerciseType, MuscleGroup};
pub use exercise::{CreateExercise, Exercise, ExerciseFilter, UpdateExercise};
pub use from_row::FromSqliteRow;
pub use patch::Patch;
pub use progress::{CreateUserProgress, ProgressFilter, UpdateUserProgress, UserProgress};
pub use routine::{
    CreateWorkoutRoutine, RoutineExercise, RoutineFilter, UpdateWorkoutRoutine, WorkoutRoutine,
};
pub use user::{CreateUser, UpdateUser, User};
pub use workout_session::{
    CreateWorkoutSession, SessionFilter, UpdateWorkoutSession, WorkoutSession,
};
