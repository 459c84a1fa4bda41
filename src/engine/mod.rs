// Engine modules: scheduling, transforms, physics, input, visuals

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod scheduler;
pub mod transform;
