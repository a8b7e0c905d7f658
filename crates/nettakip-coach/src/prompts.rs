//! The three coaching prompt templates.
//!
//! Each template interpolates pre-aggregated statistics into Turkish
//! natural-language instructions. The model's reply is treated as opaque
//! Markdown; nothing here parses it back.

use chrono::{DateTime, Utc};

use nettakip_core::model::StudyEntry;
use nettakip_core::scoring::entry_net;
use nettakip_core::stats::{subject_stats, SubjectStats};

/// How many recent entries are summarized into a prompt.
const SUMMARY_LIMIT: usize = 50;

/// One summary line per recent entry, newest first.
pub fn entry_summary(entries: &[StudyEntry]) -> String {
    if entries.is_empty() {
        return "Henüz veri yok.".to_string();
    }
    entries
        .iter()
        .take(SUMMARY_LIMIT)
        .map(|e| {
            format!(
                "- {}: {} ({}) - {} Doğru, {} Yanlış ({:.2} Net), {} dk.",
                e.date.format("%d.%m.%Y"),
                e.subject,
                e.topic,
                e.correct_count,
                e.incorrect_count,
                entry_net(e),
                e.duration_minutes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Free-form study advice over the recent history.
pub fn advice_prompt(entries: &[StudyEntry]) -> String {
    format!(
        "Sen tecrübeli ve motive edici bir YKS (Yükseköğretim Kurumları Sınavı) öğrenci koçusun.\n\
         Aşağıda bir öğrencinin son çalışma kayıtları bulunmaktadır. \"Net\" hesabı (4 yanlış 1 doğruyu götürür) yapılmıştır.\n\
         \n\
         Bu verileri analiz et ve öğrenciye şunları içeren kısa, markdown formatında bir geri bildirim ver:\n\
         1. Genel bir motivasyon cümlesi.\n\
         2. Hangi derslerde başarılı (yüksek net) ve hangilerinde dikkatsiz veya eksik (çok yanlış) olduğu hakkında bir gözlem.\n\
         3. Yanlış sayısı yüksek olan konular için spesifik bir öneri.\n\
         4. Uzun süredir çalışılmayan dersler varsa, \"tekrar zamanı geldi\" uyarısı ver.\n\
         \n\
         Çok uzun yazma, öz ve vurucu ol. Samimi bir dil kullan (\"sen\" dili).\n\
         \n\
         Öğrenci Verileri:\n{}",
        entry_summary(entries)
    )
}

/// Personalized 7-day (Pazartesi–Pazar) study schedule.
pub fn weekly_plan_prompt(entries: &[StudyEntry]) -> String {
    let stats_text = subject_stats(entries)
        .iter()
        .map(|s| {
            format!(
                "{}: Toplam {} soru, Ortalama Net: {:.2}, {} kayıt",
                s.subject, s.total_questions, s.average_net(), s.session_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Sen deneyimli bir YKS (Yükseköğretim Kurumları Sınavı) çalışma planı uzmanısın.\n\
         \n\
         Aşağıda bir öğrencinin ders bazlı performans istatistikleri ve son çalışma kayıtları var:\n\
         \n\
         Ders İstatistikleri:\n{stats_text}\n\
         \n\
         Son Kayıtlar:\n{}\n\
         \n\
         Bu öğrenci için kişiselleştirilmiş bir 7 günlük (Pazartesi-Pazar) çalışma programı oluştur.\n\
         \n\
         Kurallar:\n\
         - Zayıf dersler (düşük net) için DAHA FAZLA süre ayır\n\
         - Güçlü derslerin pratiğini tamamen bırakma ama daha az süre ver\n\
         - Günlük toplam çalışma 5-8 saat olsun\n\
         - Her gün 2-3 farklı ders olsun\n\
         - Haftada en az 1 deneme sınavı çözümü planla\n\
         - Aralıklı tekrar kuralını uygula (3 gün önce çalışılan konuları tekrar programla)\n\
         \n\
         Formatı:\n\
         Her gün için:\n\
         ## 📅 [Gün adı]\n\
         - **[Saat aralığı]** — [Ders]: [Konu/Aktivite]\n\
         \n\
         Sonunda kısa bir motivasyon mesajı ekle. Samimi dil kullan.",
        entry_summary(entries)
    )
}

/// Multi-section performance report over the full per-subject rollups.
pub fn performance_prompt(entries: &[StudyEntry], now: DateTime<Utc>) -> String {
    let stats_text = subject_stats(entries)
        .iter()
        .map(|s| performance_line(s, now))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Sen bir eğitim veri analisti ve YKS uzmanısın.\n\
         \n\
         Aşağıda bir öğrencinin tüm ders bazlı performans verileri var:\n\
         \n\
         {stats_text}\n\
         \n\
         Detaylı bir performans raporu oluştur. Şu başlıkları kullan:\n\
         \n\
         ## 💪 Güçlü Yönler\n\
         Yüksek net ve doğruluk oranına sahip dersler. Neden iyi olduğuna dair kısa analiz.\n\
         \n\
         ## ⚠️ Geliştirilmesi Gereken Alanlar\n\
         Düşük net veya yüksek yanlış oranına sahip dersler. Spesifik öneriler.\n\
         \n\
         ## ⏰ Tekrar Gereken Konular\n\
         Uzun süredir çalışılmayan dersler (3+ gün). Aralıklı tekrar hatırlatması.\n\
         \n\
         ## 📊 Verimlilik Analizi\n\
         Soru çözme hızı (soru/saat) değerlendirmesi. Hangi derslerde yavaş, hangisinde hızlı.\n\
         \n\
         ## 🎯 Öncelik Sıralaması\n\
         Bu hafta hangi derslere öncelik vermeli? Sıralı liste.\n\
         \n\
         Kısa ve öz yaz. Samimi dil kullan."
    )
}

fn performance_line(s: &SubjectStats, now: DateTime<Utc>) -> String {
    format!(
        "{}: {} soru, {:.2} net, %{:.1} doğruluk, {:.1} soru/saat, {} dk süre, son çalışma {} gün önce",
        s.subject,
        s.total_questions,
        s.net_sum,
        s.accuracy_pct(),
        s.questions_per_hour(),
        s.total_minutes,
        s.days_since_studied(now)
    )
}
