//! 注册与登录路径上的 Argon2id 开销
//!
//! 登录时已知账户的成功与失败都要付出一次完整校验，两者耗时应接近。

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shortmark::utils::password::{hash_password, verify_password};

// 最短允许密码、常见长度、口令短语
const PASSWORD_LENGTHS: [usize; 3] = [6, 32, 128];

fn password_of(len: usize) -> String {
    "p".repeat(len)
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register/hash");
    group.sample_size(10);

    for len in PASSWORD_LENGTHS {
        let password = password_of(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &password, |b, password| {
            b.iter(|| hash_password(black_box(password)).expect("hash should succeed"));
        });
    }

    group.finish();
}

fn bench_login(c: &mut Criterion) {
    let mut group = c.benchmark_group("login/verify");
    group.sample_size(10);

    for len in PASSWORD_LENGTHS {
        let password = password_of(len);
        let stored = hash_password(&password).expect("hash should succeed");
        let wrong = format!("{password}x");

        group.bench_with_input(BenchmarkId::new("match", len), &password, |b, password| {
            b.iter(|| assert!(verify_password(black_box(password), &stored).expect("verify should succeed")));
        });

        group.bench_with_input(BenchmarkId::new("mismatch", len), &wrong, |b, wrong| {
            b.iter(|| assert!(!verify_password(black_box(wrong), &stored).expect("verify should succeed")));
        });
    }

    group.finish();
}

/// 存储的哈希无法解析时在进入 Argon2 之前就失败
fn bench_login_unreadable_hash(c: &mut Criterion) {
    c.bench_function("login/unreadable_hash", |b| {
        b.iter(|| assert!(verify_password(black_box("secret1"), "not-a-phc-string").is_err()));
    });
}

criterion_group!(benches, bench_register, bench_login, bench_login_unreadable_hash);
criterion_main!(benches);
