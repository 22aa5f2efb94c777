//! Parallel processing utilities

/// Number of worker threads for a requested count (0 = all available cores)
pub fn resolve_threads(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

pub fn configure_thread_pool(threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_threads(threads))
        .build_global()
}
