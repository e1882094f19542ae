//! Python bindings for lexibloom using PyO3

use crate::hash;
use crate::{BloomError, BloomFilter, FilterConfig};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

fn to_py_err(err: BloomError) -> PyErr {
    match err {
        BloomError::Hashing { .. } => PyKeyError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Python wrapper for BloomFilter
#[pyclass(name = "BloomFilter")]
struct PyBloomFilter {
    inner: BloomFilter,
}

#[pymethods]
impl PyBloomFilter {
    #[new]
    #[pyo3(signature = (words=None, false_positive_rate=0.01, size=None, hash_functions=None))]
    fn new(
        words: Option<Vec<String>>,
        false_positive_rate: f64,
        size: Option<usize>,
        hash_functions: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let mut config = FilterConfig {
            bit_count: size,
            false_positive_rate,
            seed_data: words.unwrap_or_default(),
            ..FilterConfig::default()
        };
        if let Some(names) = hash_functions {
            config.hash_functions = hash::resolve_all(&names).map_err(to_py_err)?;
        }

        let inner = BloomFilter::new(config).map_err(to_py_err)?;
        Ok(PyBloomFilter { inner })
    }

    #[staticmethod]
    fn from_bytes(data: &[u8]) -> PyResult<Self> {
        let inner = BloomFilter::from_bytes(data).map_err(to_py_err)?;
        Ok(PyBloomFilter { inner })
    }

    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<&'py PyBytes> {
        let bytes = self.inner.to_bytes().map_err(to_py_err)?;
        Ok(PyBytes::new(py, &bytes))
    }

    fn insert(&mut self, value: &str) {
        self.inner.insert(value);
    }

    fn insert_all(&mut self, values: Vec<String>) {
        self.inner.insert_all(&values);
    }

    fn contains(&self, value: &str) -> bool {
        self.inner.contains(value)
    }

    fn __contains__(&self, value: &str) -> bool {
        self.inner.contains(value)
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn hash_functions(&self) -> Vec<String> {
        self.inner
            .hash_names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }

    fn estimated_fpr(&self) -> f64 {
        self.inner.estimated_fpr()
    }

    fn stats(&self) -> String {
        self.inner.stats().to_string()
    }

    fn __str__(&self) -> String {
        self.stats()
    }

    fn __repr__(&self) -> String {
        format!(
            "BloomFilter(size={}, hash_functions={:?})",
            self.inner.size(),
            self.inner.hash_names()
        )
    }
}

/// Names of every registered hash function, in selection order
#[pyfunction]
fn hash_function_names() -> Vec<String> {
    hash::reference_family()
        .iter()
        .map(|h| h.name().to_string())
        .collect()
}

/// Sizing helper mirroring `optimal_bloom_parameters`
#[pyfunction]
fn optimal_parameters(items: usize, false_positive_rate: f64) -> PyResult<(usize, usize, f64)> {
    let params = crate::sizing::optimal_bloom_parameters(items, false_positive_rate, None)
        .map_err(to_py_err)?;
    Ok((
        params.optimal_num_bits,
        params.optimal_num_hashes,
        params.expected_fpr,
    ))
}

/// Python module definition
#[pymodule]
fn lexibloom(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyBloomFilter>()?;

    m.add_function(wrap_pyfunction!(hash_function_names, m)?)?;
    m.add_function(wrap_pyfunction!(optimal_parameters, m)?)?;

    m.add("TEXT_ENCODING", hash::TEXT_ENCODING)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
